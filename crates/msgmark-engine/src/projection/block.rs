//! Rules for block constructs: fenced code, headings, quotes, list items.

use crate::parsing::ast::Node;
use crate::parsing::kinds::{AtxHeading, BlockQuote, CodeFence, ListMarker};
use crate::parsing::rope::{LineOffsets, Span};

use super::Projected;
use super::style::{StyleKind, StyleRange};

pub fn fenced_code(node: &Node, offsets: &LineOffsets, text: &str) -> Option<Projected> {
    let len = text.len();
    let first = node.first_span()?;
    let open = first.to_span(offsets);
    let fence = CodeFence::open(text.get(open.range())?)?;
    let open_line = offsets.line(first.line)?;
    let open_delim = Span::new(open.start, open_line.end);

    let rest = node.spans.get(1..).unwrap_or_default();
    let closing = rest.last().copied().filter(|last| {
        let sp = last.to_span(offsets);
        last.length == fence.len
            && text
                .get(sp.range())
                .is_some_and(|s| CodeFence::closes(fence, s))
    });
    let content_lines = match closing {
        Some(_) => &rest[..rest.len() - 1],
        None => rest,
    };

    let content = match (content_lines.first(), content_lines.last()) {
        (Some(f), Some(l)) => Span::new(f.to_span(offsets).start, l.to_span(offsets).end),
        _ => match closing {
            Some(c) => Span::empty(c.to_span(offsets).start),
            None => Span::empty(open_delim.end),
        },
    }
    .clamp_to(len);

    let mut delimiters = vec![open_delim.clamp_to(len)];
    if let Some(c) = closing {
        let close = c.to_span(offsets);
        let start = if content_lines.is_empty() {
            close.start
        } else {
            content.end
        };
        delimiters.push(Span::new(start, close.end).clamp_to(len));
    }

    Some(Projected::new(
        StyleRange::block(StyleKind::CodeBlock, content),
        delimiters,
    ))
}

pub fn heading(node: &Node, level: u8, offsets: &LineOffsets, text: &str) -> Option<Projected> {
    if level > AtxHeading::MAX_STYLED_LEVEL || node.total_len() <= usize::from(level) {
        log::debug!("heading level {level} with {} bytes left unstyled", node.total_len());
        return None;
    }
    let first = node.first_span()?;
    let sp = first.to_span(offsets);
    let Some(marker) = AtxHeading::marker(text.get(sp.range())?) else {
        log::debug!("setext heading at line {} left unstyled", first.line);
        return None;
    };
    let line = offsets.line(first.line)?;
    let prefix = text.get(line.start..sp.start)?;
    let delim_start = if prefix.trim().is_empty() {
        line.start
    } else {
        sp.start
    };
    let delim = Span::new(delim_start, sp.start + marker.end);
    let content = Span::new(delim.end, sp.end.max(delim.end));
    Some(Projected::new(
        StyleRange::block(StyleKind::Heading { level }, content),
        vec![delim],
    ))
}

/// A block quote. `separator` is set when a blank line follows the quote, so
/// render mode can collapse it.
pub fn quote(node: &Node, offsets: &LineOffsets, text: &str) -> Option<Projected> {
    if node.total_len() <= 1 {
        log::debug!("bare quote marker left unstyled");
        return None;
    }
    let first = node.first_span()?;
    let last = node.last_span()?;
    let outer = Span::new(first.to_span(offsets).start, last.to_span(offsets).end);

    let delimiters = node
        .spans
        .iter()
        .filter_map(|s| {
            let abs = s.to_span(offsets);
            let n = BlockQuote::marker_len(text.get(abs.range())?)?;
            Some(Span::new(abs.start, abs.start + n))
        })
        .collect();

    let line = offsets.line(last.line)?;
    let separator = (!line.separator().is_empty() && offsets.is_blank(text, last.line + 1))
        .then(|| line.separator());

    let mut projected = Projected::new(StyleRange::block(StyleKind::Quote, outer), delimiters);
    projected.separator = separator;
    Some(projected)
}

/// Where an item sits: its list's label source and its nesting.
pub struct ItemContext {
    pub label: Option<String>,
    pub level: usize,
    pub quote_depth: usize,
}

pub fn list_item(
    node: &Node,
    ctx: ItemContext,
    offsets: &LineOffsets,
    text: &str,
) -> Option<Projected> {
    let first = node.first_span()?;
    let sp = first.to_span(offsets);
    let line = offsets.line(first.line)?;
    let prefix = text.get(line.start..sp.start)?;
    let unquoted = prefix.get(BlockQuote::skip_prefixes(prefix, ctx.quote_depth)..)?;
    if first.column != 0 && !unquoted.trim().is_empty() {
        log::debug!("inline list marker at line {} ignored", first.line);
        return None;
    }

    let marker = ListMarker::parse(text.get(sp.range())?)?;
    let start = if prefix.trim().is_empty() {
        line.start
    } else {
        sp.start
    };

    // The item's own lines end where a nested list begins.
    let nested = node.children.iter().find(|c| c.kind.is_list()).map(|c| c.range.start);
    let stop_line = nested.map_or(usize::MAX, |at| offsets.line_of(at));
    let end = node
        .spans
        .iter()
        .filter(|s| s.line < stop_line)
        .map(|s| s.to_span(offsets).end)
        .last()
        .unwrap_or_else(|| nested.map_or(sp.end, |at| at.min(sp.end)))
        .max(start);

    // An item too short to hold its rendered label keeps its marker.
    let label_len = ctx.label.as_ref().map_or(ListMarker::BULLET.len(), String::len);
    let kind = match ctx.label {
        Some(label) => StyleKind::OrderedListItem {
            level: ctx.level,
            label,
        },
        None => StyleKind::ListItem { level: ctx.level },
    };
    let delimiters = if first.length >= label_len {
        vec![Span::new(start, sp.start + marker.end)]
    } else {
        Vec::new()
    };
    Some(Projected::new(
        StyleRange::block(kind, Span::new(start, end)),
        delimiters,
    ))
}
