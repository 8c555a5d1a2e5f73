use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use super::ast::{Ast, Node, NodeKind, SourceSpan};
use super::kinds::BlockQuote;
use super::rope::{LineOffsets, Span};
use crate::error::ParseError;

struct Frame {
    kind: NodeKind,
    range: Span,
    /// Block quotes enclosing this node, not counting the node itself.
    quotes_outside: usize,
    children: Vec<Node>,
}

/// Folds the grammar's flat start/end event stream into a node tree whose
/// nodes carry per-line source spans.
pub struct AstBuilder<'t> {
    text: &'t str,
    offsets: &'t LineOffsets,
    stack: Vec<Frame>,
    max_depth: usize,
    deepest: usize,
}

impl<'t> AstBuilder<'t> {
    pub fn new(text: &'t str, offsets: &'t LineOffsets, max_depth: usize) -> Self {
        let root = Frame {
            kind: NodeKind::Document,
            range: Span::new(0, text.len()),
            quotes_outside: 0,
            children: Vec::new(),
        };
        Self {
            text,
            offsets,
            stack: vec![root],
            max_depth,
            deepest: 1,
        }
    }

    pub fn build(mut self) -> Result<Ast, ParseError> {
        let parser = Parser::new_ext(self.text, Options::ENABLE_STRIKETHROUGH);
        for (event, range) in parser.into_offset_iter() {
            let range = self.check_range(range)?;
            match event {
                Event::Start(tag) => self.open(kind_of_tag(&tag), range)?,
                Event::End(_) => self.close(),
                other => self.leaf(kind_of_leaf(&other), range),
            }
        }
        while self.stack.len() > 1 {
            self.close();
        }

        let root = match self.stack.pop() {
            Some(frame) => self.finish(frame),
            None => Node {
                kind: NodeKind::Document,
                range: Span::new(0, self.text.len()),
                spans: Vec::new(),
                children: Vec::new(),
            },
        };
        Ok(Ast {
            root,
            depth: self.deepest,
        })
    }

    fn check_range(&self, range: Range<usize>) -> Result<Span, ParseError> {
        let len = self.text.len();
        let valid = range.start <= range.end
            && range.end <= len
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end);
        if !valid {
            return Err(ParseError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(Span::from(range))
    }

    fn quotes_inside_top(&self) -> usize {
        self.stack.last().map_or(0, |f| {
            f.quotes_outside + usize::from(f.kind == NodeKind::BlockQuote)
        })
    }

    fn open(&mut self, kind: NodeKind, range: Span) -> Result<(), ParseError> {
        let depth = self.stack.len() + 1;
        if depth > self.max_depth {
            return Err(ParseError::TooDeep {
                depth,
                limit: self.max_depth,
            });
        }
        self.deepest = self.deepest.max(depth);
        let quotes_outside = self.quotes_inside_top();
        self.stack.push(Frame {
            kind,
            range,
            quotes_outside,
            children: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(frame) = self.stack.pop() {
            let node = self.finish(frame);
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(node);
            }
        }
    }

    fn leaf(&mut self, kind: NodeKind, range: Span) {
        let spans = split_lines(self.text, self.offsets, range, 0);
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node {
                kind,
                range,
                spans,
                children: Vec::new(),
            });
        }
    }

    fn finish(&self, frame: Frame) -> Node {
        let skip = if frame.kind.is_block() {
            frame.quotes_outside
        } else {
            0
        };
        Node {
            spans: split_lines(self.text, self.offsets, frame.range, skip),
            kind: frame.kind,
            range: frame.range,
            children: frame.children,
        }
    }
}

/// Splits a byte range into one span per physical line.
///
/// Separators are excluded. Continuation lines skip `quote_prefixes` leading
/// `>` markers so a nested construct's spans start at its own syntax. Empty
/// trailing pieces are dropped, but at least one span is always returned.
pub fn split_lines(
    text: &str,
    offsets: &LineOffsets,
    range: Span,
    quote_prefixes: usize,
) -> Vec<SourceSpan> {
    let first = offsets.line_of(range.start);
    let mut spans = Vec::new();
    let mut line = first;

    while let Some(l) = offsets.line(line) {
        if line > first && l.start >= range.end {
            break;
        }
        let mut start = range.start.max(l.start).min(l.content_end);
        if line > first && quote_prefixes > 0 {
            let skip = BlockQuote::skip_prefixes(offsets.line_text(text, line), quote_prefixes);
            start = start.max(l.start + skip).min(l.content_end);
        }
        let end = range.end.min(l.content_end).max(start);
        spans.push(SourceSpan {
            line,
            column: start - l.start,
            length: end - start,
        });
        line += 1;
    }

    while spans.len() > 1 && spans.last().is_some_and(|s| s.length == 0) {
        spans.pop();
    }
    spans
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn kind_of_tag(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: heading_level(*level),
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::FencedCode {
            info: info.to_string(),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::IndentedCode,
        Tag::HtmlBlock => NodeKind::HtmlBlock,
        Tag::List(Some(start)) => NodeKind::OrderedList { start: *start },
        Tag::List(None) => NodeKind::BulletList,
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { .. } => NodeKind::Link,
        Tag::Image { .. } => NodeKind::Image,
        _ => NodeKind::Other,
    }
}

fn kind_of_leaf(event: &Event<'_>) -> NodeKind {
    match event {
        Event::Text(_) => NodeKind::Text,
        Event::Code(_) => NodeKind::InlineCode,
        Event::SoftBreak => NodeKind::SoftBreak,
        Event::HardBreak => NodeKind::HardBreak,
        Event::Rule => NodeKind::ThematicBreak,
        _ => NodeKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(text: &str, range: Span, quotes: usize) -> Vec<(usize, usize, usize)> {
        let offsets = LineOffsets::build(text);
        split_lines(text, &offsets, range, quotes)
            .into_iter()
            .map(|s| (s.line, s.column, s.length))
            .collect()
    }

    #[test]
    fn single_line_range() {
        assert_eq!(spans("hello world", Span::new(6, 11), 0), vec![(0, 6, 5)]);
    }

    #[test]
    fn multi_line_range_excludes_separators() {
        assert_eq!(
            spans("ab\r\ncd\nef", Span::new(1, 9), 0),
            vec![(0, 1, 1), (1, 0, 2), (2, 0, 2)]
        );
    }

    #[test]
    fn trailing_empty_piece_is_dropped() {
        assert_eq!(spans("ab\ncd\n", Span::new(0, 6), 0), vec![(0, 0, 2), (1, 0, 2)]);
    }

    #[test]
    fn interior_blank_line_is_kept() {
        assert_eq!(
            spans("a\n\nb", Span::new(0, 4), 0),
            vec![(0, 0, 1), (1, 0, 0), (2, 0, 1)]
        );
    }

    #[test]
    fn continuation_lines_skip_quote_prefixes() {
        assert_eq!(
            spans("> > a\n> > b", Span::new(2, 11), 1),
            vec![(0, 2, 3), (1, 2, 3)]
        );
    }

    #[test]
    fn empty_range_keeps_one_span() {
        assert_eq!(spans("abc", Span::new(3, 3), 0), vec![(0, 3, 0)]);
    }
}
