use crate::parsing::rope::Span;
use crate::projection::{Annotation, Color, ParagraphStyle, StyleKind, StyleRange};

use super::options::{FormatOptions, Layout};

/// A generic rich-text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAttribute {
    Bold,
    Italic,
    Strikethrough,
    Monospace,
    Background(Color),
    Foreground(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRange {
    pub attribute: TextAttribute,
    pub span: Span,
}

pub fn attributes_for(kind: &StyleKind, options: &FormatOptions) -> Vec<TextAttribute> {
    match kind {
        StyleKind::Bold | StyleKind::Heading { .. } => vec![TextAttribute::Bold],
        StyleKind::Italic => vec![TextAttribute::Italic],
        StyleKind::Strikethrough => vec![TextAttribute::Strikethrough],
        StyleKind::InlineCode | StyleKind::CodeBlock => vec![
            TextAttribute::Monospace,
            TextAttribute::Background(options.code_background),
        ],
        _ => Vec::new(),
    }
}

pub fn paragraph_for(kind: &StyleKind, span: Span, layout: &Layout) -> Option<ParagraphStyle> {
    let (first, rest, line_height) = match kind {
        StyleKind::ListItem { level } => {
            let first = layout.list_indent_step * *level as f32 + layout.list_indent_base;
            (first, first + layout.list_rest_extra, None)
        }
        StyleKind::OrderedListItem { level, .. } => {
            let first = layout.ordered_indent_step * *level as f32 + layout.ordered_indent_base;
            (first, first + layout.ordered_rest_extra, None)
        }
        StyleKind::Quote => (layout.quote_indent, layout.quote_indent, None),
        StyleKind::Heading { level } => (0.0, 0.0, Some(layout.heading_line_height(*level))),
        _ => return None,
    };
    Some(ParagraphStyle {
        span,
        first_line_indent: first,
        rest_line_indent: rest,
        line_height,
    })
}

/// Translates content styles into attributes and paragraph styles. Empty
/// ranges are dropped; paragraph styles come back sorted by start.
pub fn collect(
    styles: &[StyleRange],
    options: &FormatOptions,
) -> (Vec<AttributeRange>, Vec<ParagraphStyle>) {
    let mut attributes = Vec::new();
    let mut paragraphs = Vec::new();
    for style in styles.iter().filter(|s| !s.span.is_empty()) {
        attributes.extend(
            attributes_for(&style.kind, options)
                .into_iter()
                .map(|attribute| AttributeRange {
                    attribute,
                    span: style.span,
                }),
        );
        paragraphs.extend(paragraph_for(&style.kind, style.span, &options.layout));
    }
    paragraphs.sort_by_key(|p| p.span.start);
    (attributes, paragraphs)
}

/// Foreground colour ranges for mention annotations.
pub fn mention_colors(annotations: &[Annotation], options: &FormatOptions) -> Vec<AttributeRange> {
    annotations
        .iter()
        .filter(|a| a.is_mention() && !a.span.is_empty())
        .map(|a| AttributeRange {
            attribute: TextAttribute::Foreground(options.mention_color),
            span: a.span,
        })
        .collect()
}
