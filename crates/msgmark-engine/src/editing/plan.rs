use crate::parsing::kinds::Delimited;
use crate::parsing::rope::{LineOffsets, Span};

use super::construct::{Construct, Shape};

/// Text to insert at an offset of the buffer produced by all earlier
/// mutations of the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub at: usize,
    pub insert: String,
}

impl Mutation {
    fn new(at: usize, insert: impl Into<String>) -> Self {
        Self {
            at,
            insert: insert.into(),
        }
    }
}

const FENCE: &str = "```";

/// Clamps a selection into `text`, orders it, and widens it onto char
/// boundaries.
pub fn normalize_selection(text: &str, selection: Span) -> Span {
    let len = text.len();
    let (a, b) = if selection.start <= selection.end {
        (selection.start, selection.end)
    } else {
        (selection.end, selection.start)
    };
    let mut start = a.min(len);
    let mut end = b.min(len);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    Span::new(start, end)
}

/// Lines the selection touches. A selection ending at the very start of a
/// line does not touch that line.
fn touched_lines(offsets: &LineOffsets, sel: Span) -> (usize, usize) {
    let first = offsets.line_of(sel.start);
    let mut last = offsets.line_of(sel.end);
    if last > first && offsets.line_start(last) == sel.end {
        last -= 1;
    }
    (first, last)
}

fn leading_ws(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// The separator ending `line`, or the next one after it, so inserted lines
/// match the buffer's own convention. `\n` when the buffer has none.
fn separator_from<'t>(text: &'t str, offsets: &LineOffsets, line: usize) -> &'t str {
    offsets
        .lines()
        .skip(line)
        .map(|l| l.separator())
        .find(|s| !s.is_empty())
        .and_then(|s| text.get(s.range()))
        .unwrap_or("\n")
}

/// Computes the insertions that apply `construct` to `selection`.
///
/// Returns nothing for an empty selection. Mutations are ordered left to
/// right and each offset already accounts for the text inserted before it.
pub fn plan_insertion(text: &str, selection: Span, construct: Construct) -> Vec<Mutation> {
    let sel = normalize_selection(text, selection);
    if sel.is_empty() {
        return Vec::new();
    }
    let offsets = LineOffsets::build(text);
    let (first, last) = touched_lines(&offsets, sel);

    let shape = match construct.shape() {
        Shape::Paired(Delimited::Code) if last > first => Shape::Fenced,
        shape => shape,
    };

    // Insertions against the original text, ascending.
    let mut planned: Vec<(usize, String)> = Vec::new();
    match shape {
        Shape::LinePrefix(marker) => {
            for line in first..=last {
                let start = offsets.line_start(line);
                let ws = leading_ws(offsets.line_text(text, line));
                planned.push((start + ws, marker.clone()));
            }
        }
        Shape::Paired(delimited) => {
            let literal = delimited.literal();
            for line in first..=last {
                let Some(l) = offsets.line(line) else { continue };
                let seg = Span::new(
                    sel.start.max(l.start),
                    sel.end.min(l.content_end).max(l.start),
                );
                let Some(seg_text) = text.get(seg.range()) else { continue };
                let trimmed = seg_text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let open = seg.start + leading_ws(seg_text);
                planned.push((open, literal.to_string()));
                planned.push((open + trimmed.len(), literal.to_string()));
            }
        }
        Shape::Fenced => {
            let sep = separator_from(text, &offsets, first);
            let at_line_start = offsets.line_start(first) == sel.start;
            let at_line_end = offsets.line_end(last) == sel.end;
            // The selection swallowed the last line's separator.
            let at_next_line = offsets.line(last + 1).is_some_and(|l| l.start == sel.end);
            let open = if at_line_start {
                format!("{FENCE}{sep}")
            } else {
                format!("{sep}{FENCE}{sep}")
            };
            let close = if at_next_line {
                format!("{FENCE}{sep}")
            } else if at_line_end {
                format!("{sep}{FENCE}")
            } else {
                format!("{sep}{FENCE}{sep}")
            };
            planned.push((sel.start, open));
            planned.push((sel.end, close));
        }
    }

    let mut shift = 0usize;
    planned
        .into_iter()
        .map(|(at, insert)| {
            let m = Mutation::new(at + shift, insert);
            shift += m.insert.len();
            m
        })
        .collect()
}
