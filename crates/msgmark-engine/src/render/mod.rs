//! # Mode Renderer
//!
//! Produces the two views of a message body:
//!
//! - **edit mode** keeps the markdown in place and marks its delimiters,
//!   either coloured or deleted;
//! - **render mode** rewrites the buffer (glyphs for list markers, collapsed
//!   blank lines, delimiters removed) and derives rich-text attributes and
//!   paragraph layout from what is left.
//!
//! A parse failure never surfaces here: the call logs a warning and returns
//! the text unformatted.

pub mod collect;
pub mod options;
pub mod rewrite;
pub mod styled;

pub use collect::{AttributeRange, TextAttribute};
pub use options::{FormatOptions, Highlight, Layout};
pub use styled::{Origin, StyledText, TaggedStyle};

use crate::editing::buffer::{EditBuffer, SpanId};
use crate::error::Degraded;
use crate::parsing::{LineOffsets, parse_with_offsets};
use crate::projection::{Annotation, ParagraphStyle, Projection, StyleKind, StyleRange, project};

/// Render-mode output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedText {
    pub text: String,
    pub attributes: Vec<AttributeRange>,
    /// Sorted by start offset.
    pub paragraphs: Vec<ParagraphStyle>,
    pub annotations: Vec<Annotation>,
}

/// Edit-mode output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedText {
    /// The original text, or the text with delimiters removed.
    pub text: String,
    /// Coloured delimiter ranges; empty when delimiters were deleted.
    pub delimiters: Vec<StyleRange>,
    pub styles: Vec<StyleRange>,
}

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Parses and projects `text`, or reports why markdown styling is skipped.
    pub fn project(&self, text: &str) -> Result<Projection, Degraded> {
        let offsets = LineOffsets::build(text);
        let ast = parse_with_offsets(text, &offsets, self.options.limits)?;
        Ok(project(&ast, &offsets, text))
    }

    fn project_or_warn(&self, text: &str) -> Option<Projection> {
        match self.project(text) {
            Ok(projection) => Some(projection),
            Err(e) => {
                log::warn!("{e}; passing {} bytes through unformatted", text.len());
                None
            }
        }
    }

    pub fn render(&self, text: &str, annotations: &[Annotation]) -> RenderedText {
        let Some(projection) = self.project_or_warn(text) else {
            return RenderedText {
                text: text.to_string(),
                attributes: collect::mention_colors(annotations, &self.options),
                paragraphs: Vec::new(),
                annotations: annotations.to_vec(),
            };
        };

        let mut buffer = EditBuffer::new(text);
        let mut entries = rewrite::track_projection(&mut buffer, &projection);
        let carried: Vec<(Annotation, SpanId)> = annotations
            .iter()
            .chain(&projection.annotations)
            .map(|a| (a.clone(), buffer.track(a.span)))
            .collect();

        rewrite::rewrite_blocks(&mut buffer, &mut entries, &self.options);
        rewrite::strip_delimiters(&mut buffer, &mut entries);
        rewrite::trim_trailing_separators(&mut buffer);

        let styles = rewrite::current_styles(&buffer, &entries);
        let annotations: Vec<Annotation> = carried
            .into_iter()
            .filter_map(|(a, id)| Some(Annotation { span: buffer.get(id)?, ..a }))
            .collect();
        let (mut attributes, paragraphs) = collect::collect(&styles, &self.options);
        attributes.extend(collect::mention_colors(&annotations, &self.options));

        log::debug!(
            "rendered {} bytes into {} at buffer version {}",
            text.len(),
            buffer.len(),
            buffer.version()
        );
        RenderedText {
            text: buffer.text(),
            attributes,
            paragraphs,
            annotations,
        }
    }

    /// Render-mode text alone, for search indexing and previews.
    pub fn plain_text(&self, text: &str) -> String {
        self.render(text, &[]).text
    }

    pub fn edit(&self, text: &str, highlight: Highlight) -> EditedText {
        let mut styled = StyledText::new(text);
        self.edit_in_place(&mut styled, highlight);
        let (text, tagged) = styled.into_parts();
        let (delimiters, styles) = tagged
            .into_iter()
            .map(|t| t.style)
            .partition(|s| s.kind.is_delimiter());
        EditedText {
            text,
            delimiters,
            styles,
        }
    }

    /// Formats a caller-owned buffer in edit mode. Ranges from a previous
    /// pass are cleared first, so repeated calls give identical ranges.
    pub fn edit_in_place(&self, styled: &mut StyledText, highlight: Highlight) {
        styled.clear_markdown();
        let Some(projection) = self.project_or_warn(styled.text()) else {
            return;
        };

        match highlight {
            Highlight::Color(color) => {
                for mut style in projection.styles() {
                    if style.kind.is_delimiter() {
                        style.kind = StyleKind::Delimiter { color: Some(color) };
                    }
                    styled.push(Origin::Markdown, style);
                }
            }
            Highlight::None => {
                let mut buffer = EditBuffer::new(styled.text());
                let mut entries = rewrite::track_projection(&mut buffer, &projection);
                let external: Vec<(TaggedStyle, SpanId)> = styled
                    .take_styles()
                    .into_iter()
                    .map(|t| {
                        let id = buffer.track(t.style.span);
                        (t, id)
                    })
                    .collect();

                rewrite::strip_delimiters(&mut buffer, &mut entries);

                styled.set_text(buffer.text());
                for (mut tagged, id) in external {
                    if let Some(span) = buffer.get(id) {
                        tagged.style.span = span;
                        styled.push(tagged.origin, tagged.style);
                    }
                }
                for style in rewrite::current_styles(&buffer, &entries) {
                    styled.push(Origin::Markdown, style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ParseLimits;
    use crate::parsing::rope::Span;
    use crate::projection::Color;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(0xFF, 0, 0);

    fn attrs(r: &RenderedText) -> Vec<(TextAttribute, &str)> {
        r.attributes
            .iter()
            .map(|a| (a.attribute, &r.text[a.span.range()]))
            .collect()
    }

    #[test]
    fn render_strips_inline_delimiters() {
        let r = Formatter::default().render("**bold** and *it*", &[]);
        assert_eq!(r.text, "bold and it");
        assert_eq!(
            attrs(&r),
            vec![(TextAttribute::Bold, "bold"), (TextAttribute::Italic, "it")]
        );
    }

    #[test]
    fn render_bullet_list() {
        let r = Formatter::default().render("- a\n- b", &[]);
        assert_eq!(r.text, "• a\n• b");
        assert_eq!(r.paragraphs.len(), 2);
        assert!((r.paragraphs[0].first_line_indent - 0.4).abs() < 1e-4);
        assert!((r.paragraphs[0].rest_line_indent - 1.0).abs() < 1e-4);
        assert_eq!(&r.text[r.paragraphs[1].span.range()], "• b");
    }

    #[test]
    fn render_heading() {
        let r = Formatter::default().render("# Title", &[]);
        assert_eq!(r.text, "Title");
        assert_eq!(attrs(&r), vec![(TextAttribute::Bold, "Title")]);
        assert_eq!(r.paragraphs[0].line_height, Some(27.0));
    }

    #[test]
    fn render_code_block() {
        let r = Formatter::default().render("```\nlet x = 1;\n```\n", &[]);
        assert_eq!(r.text, "let x = 1;");
        assert_eq!(
            attrs(&r),
            vec![
                (TextAttribute::Monospace, "let x = 1;"),
                (
                    TextAttribute::Background(FormatOptions::default().code_background),
                    "let x = 1;"
                ),
            ]
        );
    }

    #[test]
    fn render_quote_collapses_following_blank_line() {
        let r = Formatter::default().render("> quoted\n\nreply", &[]);
        assert_eq!(r.text, "quoted\nreply");
        assert_eq!(&r.text[r.paragraphs[0].span.range()], "quoted");
        let quote = r
            .annotations
            .iter()
            .find(|a| a.tag == Annotation::QUOTE_TAG)
            .unwrap();
        assert_eq!(&r.text[quote.span.range()], "quoted");
    }

    #[test]
    fn render_keeps_mentions_aligned() {
        let text = "**hey** @bob";
        let mention = Annotation::mention("user-42", Span::new(8, 12));
        let r = Formatter::default().render(text, &[mention]);
        assert_eq!(r.text, "hey @bob");
        assert_eq!(r.annotations[0].key, "user-42");
        assert_eq!(&r.text[r.annotations[0].span.range()], "@bob");
        assert!(attrs(&r).contains(&(
            TextAttribute::Foreground(FormatOptions::default().mention_color),
            "@bob"
        )));
    }

    #[test]
    fn render_custom_bullet() {
        let formatter = Formatter::new(FormatOptions {
            bullet: "* ".into(),
            ..FormatOptions::default()
        });
        assert_eq!(formatter.plain_text("- a"), "* a");
    }

    #[test]
    fn degraded_render_passes_text_through() {
        let formatter = Formatter::new(FormatOptions {
            limits: ParseLimits {
                max_input_len: 3,
                max_depth: 64,
            },
            ..FormatOptions::default()
        });
        let mention = Annotation::mention("k", Span::new(0, 2));
        let r = formatter.render("**bold**", &[mention.clone()]);
        assert_eq!(r.text, "**bold**");
        assert!(r.paragraphs.is_empty());
        assert_eq!(r.annotations, vec![mention]);
        assert_eq!(r.attributes.len(), 1);
        assert!(formatter.project("**bold**").is_err());
    }

    #[test]
    fn edit_colours_delimiters() {
        let e = Formatter::default().edit("**a**", Highlight::Color(RED));
        assert_eq!(e.text, "**a**");
        assert_eq!(
            e.delimiters,
            vec![
                StyleRange::inline(StyleKind::Delimiter { color: Some(RED) }, Span::new(0, 2)),
                StyleRange::inline(StyleKind::Delimiter { color: Some(RED) }, Span::new(3, 5)),
            ]
        );
        assert_eq!(e.styles, vec![StyleRange::inline(StyleKind::Bold, Span::new(2, 3))]);
    }

    #[test]
    fn edit_without_highlight_deletes_delimiters() {
        let e = Formatter::default().edit("**a** and `b`", Highlight::None);
        assert_eq!(e.text, "a and b");
        assert!(e.delimiters.is_empty());
        assert_eq!(
            e.styles,
            vec![
                StyleRange::inline(StyleKind::Bold, Span::new(0, 1)),
                StyleRange::inline(StyleKind::InlineCode, Span::new(6, 7)),
            ]
        );
    }

    #[test]
    fn edit_in_place_is_idempotent() {
        let formatter = Formatter::default();
        let mut styled = StyledText::new("# h\n\n- **x** `y`\n> q");
        styled.push(Origin::External, StyleRange::inline(StyleKind::Italic, Span::new(0, 1)));
        formatter.edit_in_place(&mut styled, Highlight::Color(RED));
        let first = styled.clone();
        formatter.edit_in_place(&mut styled, Highlight::Color(RED));
        assert_eq!(styled, first);
        assert_eq!(styled.styles().iter().filter(|t| t.origin == Origin::External).count(), 1);
    }

    #[test]
    fn edit_in_place_without_highlight_moves_external_ranges() {
        let mut styled = StyledText::new("**a** tail");
        styled.push(Origin::External, StyleRange::inline(StyleKind::Italic, Span::new(6, 10)));
        Formatter::default().edit_in_place(&mut styled, Highlight::None);
        assert_eq!(styled.text(), "a tail");
        let external = &styled.styles()[0];
        assert_eq!(external.origin, Origin::External);
        assert_eq!(&styled.text()[external.style.span.range()], "tail");
    }
}
