use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::parsing::rope::Span;

/// An opaque ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("colour must have 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digits in colour: {0:?}")]
    BadDigit(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#RRGGBB` (opaque) and `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(hex.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(hex.to_string()))?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            n => Err(ColorParseError::BadLength(n)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

/// What a [`StyleRange`] means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleKind {
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    CodeBlock,
    /// Levels 1 to 5; deeper headings are never styled.
    Heading {
        level: u8,
    },
    ListItem {
        level: usize,
    },
    OrderedListItem {
        level: usize,
        /// Render-mode label such as `"2. "`.
        label: String,
    },
    Quote,
    /// Literal markdown syntax belonging to a construct, as opposed to its
    /// content.
    Delimiter {
        color: Option<Color>,
    },
}

impl StyleKind {
    pub fn is_delimiter(&self) -> bool {
        matches!(self, StyleKind::Delimiter { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRange {
    pub kind: StyleKind,
    pub span: Span,
    /// Inline styles apply to characters; block styles to whole paragraphs.
    pub inline: bool,
}

impl StyleRange {
    pub fn inline(kind: StyleKind, span: Span) -> Self {
        Self {
            kind,
            span,
            inline: true,
        }
    }

    pub fn block(kind: StyleKind, span: Span) -> Self {
        Self {
            kind,
            span,
            inline: false,
        }
    }
}

/// Paragraph layout derived in render mode. Indents are in ems, line height
/// in scaled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub span: Span,
    pub first_line_indent: f32,
    pub rest_line_indent: f32,
    pub line_height: Option<f32>,
}

/// Out-of-band metadata attached to a range of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub tag: String,
    pub key: String,
    pub span: Span,
}

impl Annotation {
    /// A user mention; `key` identifies the mentioned identity.
    pub const MENTION_TAG: &'static str = "mention";
    /// Marks the start of a block quote.
    pub const QUOTE_TAG: &'static str = "quote";

    pub fn new(tag: impl Into<String>, key: impl Into<String>, span: Span) -> Self {
        Self {
            tag: tag.into(),
            key: key.into(),
            span,
        }
    }

    pub fn mention(key: impl Into<String>, span: Span) -> Self {
        Self::new(Self::MENTION_TAG, key, span)
    }

    pub fn is_mention(&self) -> bool {
        self.tag == Self::MENTION_TAG
    }
}
