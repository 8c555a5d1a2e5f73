use crate::parsing::ParseLimits;
use crate::projection::Color;

/// How edit mode treats delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Keep delimiters in the text, painted in this colour.
    Color(Color),
    /// Delete delimiters and return plain content.
    None,
}

/// Paragraph layout constants. Indents are in ems, line heights in sp.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub list_indent_step: f32,
    pub list_indent_base: f32,
    pub list_rest_extra: f32,
    pub ordered_indent_step: f32,
    pub ordered_indent_base: f32,
    pub ordered_rest_extra: f32,
    pub quote_indent: f32,
    /// Line heights for heading levels 1 to 5.
    pub heading_line_heights: [f32; 5],
    pub default_line_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            list_indent_step: 0.8,
            list_indent_base: 0.4,
            list_rest_extra: 0.6,
            ordered_indent_step: 1.1,
            ordered_indent_base: 0.4,
            ordered_rest_extra: 1.05,
            quote_indent: 2.0,
            heading_line_heights: [27.0, 24.0, 21.0, 18.0, 18.0],
            default_line_height: 18.0,
        }
    }
}

impl Layout {
    pub fn heading_line_height(&self, level: u8) -> f32 {
        usize::from(level)
            .checked_sub(1)
            .and_then(|i| self.heading_line_heights.get(i))
            .copied()
            .unwrap_or(self.default_line_height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Glyph that replaces bullet markers in render mode.
    pub bullet: String,
    /// Glyph that replaces each `>` marker in render mode; empty deletes it.
    pub quote_glyph: String,
    pub mention_color: Color,
    pub code_background: Color,
    pub layout: Layout,
    pub limits: ParseLimits,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            bullet: "• ".to_string(),
            quote_glyph: String::new(),
            mention_color: Color::rgb(0x1E, 0x88, 0xE5),
            code_background: Color::rgb(0xEE, 0xEE, 0xEE),
            layout: Layout::default(),
            limits: ParseLimits::default(),
        }
    }
}
