//! Rules for delimited inline constructs and code spans.

use crate::parsing::ast::Node;
use crate::parsing::kinds::Delimited;
use crate::parsing::rope::{LineOffsets, Span};

use super::Projected;
use super::style::{StyleKind, StyleRange};

/// Emphasis, strong and strikethrough.
///
/// Only single-line nodes are styled. A node spanning several lines is left
/// alone so user-authored line breaks inside it stay untouched.
pub fn delimited(
    node: &Node,
    which: Delimited,
    kind: StyleKind,
    offsets: &LineOffsets,
    text: &str,
) -> Option<Projected> {
    let [only] = node.spans.as_slice() else {
        log::debug!("{kind:?} spans {} lines, left unstyled", node.spans.len());
        return None;
    };
    let outer = only.to_span(offsets);
    let source = text.get(outer.range())?;
    let width = which.width(source);
    if outer.len() < width * 2 {
        return None;
    }
    let content = Span::new(outer.start + width, outer.end - width);
    if !(text.is_char_boundary(content.start) && text.is_char_boundary(content.end)) {
        return None;
    }
    Some(Projected::new(
        StyleRange::inline(kind, content),
        vec![
            Span::new(outer.start, content.start),
            Span::new(content.end, outer.end),
        ],
    ))
}

/// Inline code: one backtick of delimiter on each side, content floored so a
/// degenerate span never ends before it starts.
pub fn code_span(node: &Node, offsets: &LineOffsets, text: &str) -> Option<Projected> {
    let [only] = node.spans.as_slice() else {
        log::debug!("code span crosses {} lines, left unstyled", node.spans.len());
        return None;
    };
    let outer = only.to_span(offsets);
    if outer.is_empty() {
        return None;
    }
    let width = Delimited::Code.width("");
    let start = (outer.start + width).min(outer.end);
    let end = outer.end.saturating_sub(width).max(start);
    if !(text.is_char_boundary(start) && text.is_char_boundary(end)) {
        return None;
    }
    let delimiters = [Span::new(outer.start, start), Span::new(end, outer.end)]
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect();
    Some(Projected::new(
        StyleRange::inline(StyleKind::InlineCode, Span::new(start, end)),
        delimiters,
    ))
}
