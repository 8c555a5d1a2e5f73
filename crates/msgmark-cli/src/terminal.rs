use std::io::Write;

use anyhow::Result;
use crossterm::{
    queue,
    style::{self, Attribute, ContentStyle, PrintStyledContent, StyledContent},
};
use msgmark_engine::{AttributeRange, Color, LineOffsets, ParagraphStyle, Span, TextAttribute};

/// Columns printed per em of paragraph indent.
const COLUMNS_PER_EM: f32 = 2.0;

/// A run of text sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub span: Span,
    pub attributes: Vec<TextAttribute>,
}

/// Cuts `within` at every attribute boundary.
pub fn segments(within: Span, attributes: &[AttributeRange]) -> Vec<Segment> {
    let mut cuts = vec![within.start, within.end];
    for a in attributes {
        for at in [a.span.start, a.span.end] {
            if at > within.start && at < within.end {
                cuts.push(at);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|w| {
            let span = Span::new(w[0], w[1]);
            let attributes = attributes
                .iter()
                .filter(|a| a.span.contains(span))
                .map(|a| a.attribute)
                .collect();
            Segment { span, attributes }
        })
        .collect()
}

fn rgb(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.red(),
        g: color.green(),
        b: color.blue(),
    }
}

fn content_style(attributes: &[TextAttribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    for attribute in attributes {
        match *attribute {
            TextAttribute::Bold => style.attributes.set(Attribute::Bold),
            TextAttribute::Italic => style.attributes.set(Attribute::Italic),
            TextAttribute::Strikethrough => style.attributes.set(Attribute::CrossedOut),
            // Terminals are monospace already.
            TextAttribute::Monospace => {}
            TextAttribute::Background(c) => style.background_color = Some(rgb(c)),
            TextAttribute::Foreground(c) => style.foreground_color = Some(rgb(c)),
        }
    }
    style
}

/// Indent, in columns, for the line starting at `line_start`.
pub fn indent_at(paragraphs: &[ParagraphStyle], line_start: usize) -> usize {
    let indent = paragraphs
        .iter()
        .filter(|p| p.span.start <= line_start && line_start < p.span.end.max(p.span.start + 1))
        .map(|p| {
            if p.span.start == line_start {
                p.first_line_indent
            } else {
                p.rest_line_indent
            }
        })
        .fold(0.0f32, f32::max);
    (indent * COLUMNS_PER_EM).round() as usize
}

/// Writes `text` with its attributes as terminal escape sequences, one line
/// at a time so paragraph indents can be applied.
pub fn write_styled<W: Write>(
    out: &mut W,
    text: &str,
    attributes: &[AttributeRange],
    paragraphs: &[ParagraphStyle],
) -> Result<()> {
    let offsets = LineOffsets::build(text);
    for line in offsets.lines() {
        let indent = indent_at(paragraphs, line.start);
        if indent > 0 && !line.content().is_empty() {
            write!(out, "{:indent$}", "")?;
        }
        for segment in segments(line.content(), attributes) {
            let Some(piece) = text.get(segment.span.range()) else {
                continue;
            };
            if segment.attributes.is_empty() {
                out.write_all(piece.as_bytes())?;
            } else {
                let styled = StyledContent::new(content_style(&segment.attributes), piece);
                queue!(out, PrintStyledContent(styled))?;
            }
        }
        if !line.separator().is_empty() {
            writeln!(out)?;
        }
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
