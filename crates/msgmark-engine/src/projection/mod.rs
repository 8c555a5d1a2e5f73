//! # Span Projector
//!
//! Walks a parsed tree once and turns each construct into a content
//! [`StyleRange`] plus the delimiter ranges that bracket it. A construct that
//! fails its rule contributes nothing; its siblings are unaffected.

pub mod block;
pub mod inline;
pub mod ordinals;
pub mod style;

pub use ordinals::OrdinalCounters;
pub use style::{Annotation, Color, ColorParseError, ParagraphStyle, StyleKind, StyleRange};

use crate::parsing::ast::{Ast, Node, NodeKind};
use crate::parsing::kinds::{Delimited, ListMarker};
use crate::parsing::rope::{LineOffsets, Span};
use block::ItemContext;

/// One styled construct and its literal syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projected {
    pub style: StyleRange,
    pub delimiters: Vec<Span>,
    /// A trailing line separator render mode may delete (quotes only).
    pub separator: Option<Span>,
}

impl Projected {
    pub fn new(style: StyleRange, delimiters: Vec<Span>) -> Self {
        Self {
            style,
            delimiters,
            separator: None,
        }
    }

    /// Every delimiter span, the deletable separator included.
    pub fn all_delimiters(&self) -> impl Iterator<Item = Span> + '_ {
        self.delimiters.iter().copied().chain(self.separator)
    }
}

/// The projector's output for one buffer version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Constructs in document order.
    pub entries: Vec<Projected>,
    pub annotations: Vec<Annotation>,
}

impl Projection {
    /// Flattens constructs into style ranges: each content range followed by
    /// its uncoloured delimiter ranges.
    pub fn styles(&self) -> Vec<StyleRange> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.push(entry.style.clone());
            out.extend(entry.all_delimiters().map(|d| {
                StyleRange {
                    kind: StyleKind::Delimiter { color: None },
                    span: d,
                    inline: entry.style.inline,
                }
            }));
        }
        out
    }

    /// All delimiter spans, sorted and de-duplicated.
    pub fn delimiters(&self) -> Vec<Span> {
        let mut out: Vec<Span> = self.entries.iter().flat_map(|e| e.all_delimiters()).collect();
        out.sort();
        out.dedup();
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Synthetic index of the enclosing ordered list, if the parent is one.
    ordered_list: Option<usize>,
    item_level: usize,
    quote_depth: usize,
}

struct Projector<'a> {
    text: &'a str,
    offsets: &'a LineOffsets,
    counters: OrdinalCounters,
    out: Projection,
}

impl Projector<'_> {
    fn push(&mut self, projected: Option<Projected>) {
        if let Some(mut p) = projected {
            let len = self.text.len();
            p.style.span = p.style.span.clamp_to(len);
            p.delimiters.iter_mut().for_each(|d| *d = d.clamp_to(len));
            p.separator = p.separator.map(|s| s.clamp_to(len));
            self.out.entries.push(p);
        }
    }

    fn children(&mut self, node: &Node, ctx: Context) {
        for child in &node.children {
            self.visit(child, ctx);
        }
    }

    fn visit(&mut self, node: &Node, ctx: Context) {
        let (text, offsets) = (self.text, self.offsets);
        let inner = Context {
            ordered_list: None,
            ..ctx
        };
        match &node.kind {
            NodeKind::Emphasis => {
                self.push(inline::delimited(
                    node,
                    Delimited::Emphasis,
                    StyleKind::Italic,
                    offsets,
                    text,
                ));
                self.children(node, inner);
            }
            NodeKind::Strong => {
                self.push(inline::delimited(
                    node,
                    Delimited::Strong,
                    StyleKind::Bold,
                    offsets,
                    text,
                ));
                self.children(node, inner);
            }
            NodeKind::Strikethrough => {
                self.push(inline::delimited(
                    node,
                    Delimited::Strikethrough,
                    StyleKind::Strikethrough,
                    offsets,
                    text,
                ));
                self.children(node, inner);
            }
            NodeKind::InlineCode => self.push(inline::code_span(node, offsets, text)),
            NodeKind::FencedCode { .. } => self.push(block::fenced_code(node, offsets, text)),
            NodeKind::IndentedCode | NodeKind::HtmlBlock => {}
            NodeKind::Heading { level } => {
                self.push(block::heading(node, *level, offsets, text));
                self.children(node, inner);
            }
            NodeKind::BlockQuote => {
                let projected = block::quote(node, offsets, text);
                if let Some(p) = &projected {
                    self.out.annotations.push(Annotation::new(
                        Annotation::QUOTE_TAG,
                        (ctx.quote_depth + 1).to_string(),
                        p.style.span,
                    ));
                }
                self.push(projected);
                self.children(
                    node,
                    Context {
                        quote_depth: ctx.quote_depth + 1,
                        ..inner
                    },
                );
            }
            NodeKind::OrderedList { start } => {
                let list = self.counters.start_list(*start);
                self.children(
                    node,
                    Context {
                        ordered_list: Some(list),
                        ..ctx
                    },
                );
            }
            NodeKind::ListItem => {
                let label = ctx
                    .ordered_list
                    .map(|list| ListMarker::ordinal_label(self.counters.next(list)));
                let item = ItemContext {
                    label,
                    level: ctx.item_level,
                    quote_depth: ctx.quote_depth,
                };
                self.push(block::list_item(node, item, offsets, text));
                self.children(
                    node,
                    Context {
                        item_level: ctx.item_level + 1,
                        ..inner
                    },
                );
            }
            _ => self.children(node, inner),
        }
    }
}

/// Projects `ast`, parsed from `text`, onto byte ranges of `text`.
pub fn project(ast: &Ast, offsets: &LineOffsets, text: &str) -> Projection {
    let mut projector = Projector {
        text,
        offsets,
        counters: OrdinalCounters::new(),
        out: Projection::default(),
    };
    projector.visit(&ast.root, Context::default());
    log::trace!(
        "projected {} constructs over {} lists",
        projector.out.entries.len(),
        projector.counters.list_count()
    );
    projector.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;

    fn project_text(text: &str) -> Projection {
        let ast = parse_document(text).unwrap();
        project(&ast, &LineOffsets::build(text), text)
    }

    fn kinds(p: &Projection) -> Vec<StyleKind> {
        p.entries.iter().map(|e| e.style.kind.clone()).collect()
    }

    #[test]
    fn bold_content_and_delimiters() {
        let p = project_text("**bold**");
        assert_eq!(
            p.entries,
            vec![Projected::new(
                StyleRange::inline(StyleKind::Bold, Span::new(2, 6)),
                vec![Span::new(0, 2), Span::new(6, 8)],
            )]
        );
    }

    #[test]
    fn flattened_styles_follow_each_construct() {
        let styles = project_text("**bold**").styles();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[0].kind, StyleKind::Bold);
        assert!(styles[1..].iter().all(|s| s.kind.is_delimiter()));
    }

    #[test]
    fn italic_and_strikethrough() {
        let p = project_text("*a* ~~b~~");
        assert_eq!(kinds(&p), vec![StyleKind::Italic, StyleKind::Strikethrough]);
        assert_eq!(p.entries[0].style.span, Span::new(1, 2));
        assert_eq!(p.entries[1].style.span, Span::new(6, 7));
        assert_eq!(p.entries[1].delimiters, vec![Span::new(4, 6), Span::new(7, 9)]);
    }

    #[test]
    fn multi_line_emphasis_is_left_alone() {
        let p = project_text("*one\ntwo*");
        assert!(p.entries.is_empty());
    }

    #[test]
    fn inline_code_strips_one_backtick_each_side() {
        let p = project_text("run `ls` now");
        assert_eq!(
            p.entries,
            vec![Projected::new(
                StyleRange::inline(StyleKind::InlineCode, Span::new(5, 7)),
                vec![Span::new(4, 5), Span::new(7, 8)],
            )]
        );
    }

    #[test]
    fn heading_content_after_marker() {
        let p = project_text("# Title");
        assert_eq!(
            p.entries,
            vec![Projected::new(
                StyleRange::block(StyleKind::Heading { level: 1 }, Span::new(2, 7)),
                vec![Span::new(0, 2)],
            )]
        );
    }

    #[test]
    fn heading_without_space_is_not_a_heading() {
        assert!(project_text("#Title").entries.is_empty());
    }

    #[test]
    fn setext_heading_is_rejected() {
        assert!(project_text("Title\n===").entries.is_empty());
    }

    #[test]
    fn level_six_heading_is_rejected() {
        assert!(project_text("###### six").entries.is_empty());
    }

    #[test]
    fn closed_fence_has_two_delimiters() {
        let text = "```\ncode\n```";
        let p = project_text(text);
        assert_eq!(
            p.entries,
            vec![Projected::new(
                StyleRange::block(StyleKind::CodeBlock, Span::new(4, 8)),
                vec![Span::new(0, 4), Span::new(8, 12)],
            )]
        );
    }

    #[test]
    fn unclosed_fence_has_only_opening_delimiter() {
        let p = project_text("```\ncode");
        assert_eq!(p.entries.len(), 1);
        assert_eq!(p.entries[0].delimiters, vec![Span::new(0, 4)]);
        assert_eq!(p.entries[0].style.span, Span::new(4, 8));
    }

    #[test]
    fn code_block_hides_inner_markup() {
        let p = project_text("```\n**not bold**\n```");
        assert_eq!(kinds(&p), vec![StyleKind::CodeBlock]);
    }

    #[test]
    fn quote_delimiters_per_line() {
        let text = "> one\n> two";
        let p = project_text(text);
        assert_eq!(p.entries[0].style, StyleRange::block(StyleKind::Quote, Span::new(0, 11)));
        assert_eq!(p.entries[0].delimiters, vec![Span::new(0, 2), Span::new(6, 8)]);
        assert_eq!(p.entries[0].separator, None);
        assert_eq!(
            p.annotations,
            vec![Annotation::new(Annotation::QUOTE_TAG, "1", Span::new(0, 11))]
        );
    }

    #[test]
    fn quote_followed_by_blank_line_marks_separator() {
        let p = project_text("> q\n\nafter");
        assert_eq!(p.entries[0].separator, Some(Span::new(3, 4)));
    }

    #[test]
    fn bare_quote_marker_is_rejected() {
        let p = project_text(">");
        assert!(p.entries.is_empty());
        assert!(p.annotations.is_empty());
    }

    #[test]
    fn ordered_labels_ignore_typed_numbers() {
        let p = project_text("1. a\n1. b\n");
        assert_eq!(
            kinds(&p),
            vec![
                StyleKind::OrderedListItem {
                    level: 0,
                    label: "1. ".into()
                },
                StyleKind::OrderedListItem {
                    level: 0,
                    label: "2. ".into()
                },
            ]
        );
    }

    #[test]
    fn ordered_labels_start_from_declared_number() {
        let p = project_text("3. a\n4. b\n");
        assert_eq!(
            p.entries[1].style.kind,
            StyleKind::OrderedListItem {
                level: 0,
                label: "4. ".into()
            }
        );
    }

    #[test]
    fn bullet_items_and_delimiters() {
        let p = project_text("- a\n- b");
        assert_eq!(
            p.entries,
            vec![
                Projected::new(
                    StyleRange::block(StyleKind::ListItem { level: 0 }, Span::new(0, 3)),
                    vec![Span::new(0, 2)],
                ),
                Projected::new(
                    StyleRange::block(StyleKind::ListItem { level: 0 }, Span::new(4, 7)),
                    vec![Span::new(4, 6)],
                ),
            ]
        );
    }

    #[test]
    fn item_shorter_than_its_label_keeps_marker() {
        let items = |p: &Projection| -> Vec<Vec<Span>> {
            p.entries
                .iter()
                .filter(|e| matches!(e.style.kind, StyleKind::OrderedListItem { .. }))
                .map(|e| e.delimiters.clone())
                .collect()
        };
        assert!(items(&project_text("1.")).iter().all(Vec::is_empty));
        assert_eq!(items(&project_text("1. a")), vec![vec![Span::new(0, 3)]]);
    }

    #[test]
    fn nested_item_level_and_parent_range() {
        let p = project_text("- a\n  - b");
        assert_eq!(
            kinds(&p),
            vec![StyleKind::ListItem { level: 0 }, StyleKind::ListItem { level: 1 }]
        );
        assert_eq!(p.entries[0].style.span, Span::new(0, 3));
        assert_eq!(p.entries[1].delimiters, vec![Span::new(4, 8)]);
    }

    #[test]
    fn inline_styles_inside_list_item() {
        let p = project_text("- **b**");
        assert_eq!(
            kinds(&p),
            vec![StyleKind::ListItem { level: 0 }, StyleKind::Bold]
        );
    }

    #[test]
    fn crlf_shifts_ranges_by_separator_length() {
        let lf = project_text("x\n**b**");
        let crlf = project_text("x\r\n**b**");
        assert_eq!(lf.entries[0].style.span, Span::new(4, 5));
        assert_eq!(crlf.entries[0].style.span, Span::new(5, 6));
    }

    #[test]
    fn every_range_within_buffer() {
        let text = "# h\n\n> **q** `c`\n>\n- a\n  1. b\n\n```\nx";
        let p = project_text(text);
        for s in p.styles() {
            assert!(s.span.start <= s.span.end && s.span.end <= text.len(), "{s:?}");
        }
    }

    #[test]
    fn projection_is_idempotent() {
        let text = "**a** _b_\n\n1. x\n2. y\n\n> q";
        assert_eq!(project_text(text), project_text(text));
    }
}
