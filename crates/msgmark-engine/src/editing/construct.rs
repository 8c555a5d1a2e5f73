use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::parsing::kinds::{AtxHeading, BlockQuote, Delimited, ListMarker};

/// A markdown construct the inserter can apply to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    /// Always a fenced block, whatever the selection.
    CodeBlock,
    Heading(u8),
    Quote,
    BulletList,
    OrderedList,
}

/// How a construct is written around a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A marker after the leading whitespace of every touched line.
    LinePrefix(String),
    /// A delimiter on each side of every non-blank line's content.
    Paired(Delimited),
    /// Fences on their own lines around the whole selection.
    Fenced,
}

impl Construct {
    pub fn shape(self) -> Shape {
        match self {
            Construct::Bold => Shape::Paired(Delimited::Strong),
            Construct::Italic => Shape::Paired(Delimited::Emphasis),
            Construct::Strikethrough => Shape::Paired(Delimited::Strikethrough),
            Construct::InlineCode => Shape::Paired(Delimited::Code),
            Construct::CodeBlock => Shape::Fenced,
            Construct::Heading(level) => Shape::LinePrefix(AtxHeading::prefix(level.clamp(1, 6))),
            Construct::Quote => Shape::LinePrefix(format!("{} ", BlockQuote::PREFIX)),
            Construct::BulletList => Shape::LinePrefix(ListMarker::BULLET.to_string()),
            Construct::OrderedList => Shape::LinePrefix(ListMarker::ORDERED.to_string()),
        }
    }
}

const KNOWN: &str = "bold, italic, strike, code, codeblock, h1-h6, quote, bullet, ordered";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown construct {0:?}; expected one of {known}", known = KNOWN)]
pub struct UnknownConstruct(pub String);

impl FromStr for Construct {
    type Err = UnknownConstruct;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let construct = match name.as_str() {
            "bold" => Construct::Bold,
            "italic" => Construct::Italic,
            "strike" | "strikethrough" => Construct::Strikethrough,
            "code" => Construct::InlineCode,
            "codeblock" | "fence" => Construct::CodeBlock,
            "quote" => Construct::Quote,
            "bullet" | "list" => Construct::BulletList,
            "ordered" | "numbered" => Construct::OrderedList,
            _ => match name.strip_prefix('h').and_then(|n| n.parse::<u8>().ok()) {
                Some(level @ 1..=6) => Construct::Heading(level),
                _ => return Err(UnknownConstruct(s.to_string())),
            },
        };
        Ok(construct)
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Bold => f.write_str("bold"),
            Construct::Italic => f.write_str("italic"),
            Construct::Strikethrough => f.write_str("strike"),
            Construct::InlineCode => f.write_str("code"),
            Construct::CodeBlock => f.write_str("codeblock"),
            Construct::Heading(level) => write!(f, "h{level}"),
            Construct::Quote => f.write_str("quote"),
            Construct::BulletList => f.write_str("bullet"),
            Construct::OrderedList => f.write_str("ordered"),
        }
    }
}
