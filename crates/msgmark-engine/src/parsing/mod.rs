//! # Grammar Parser
//!
//! Turns a message body into an [`Ast`] of block and inline nodes. The
//! grammar itself is `pulldown-cmark` with strikethrough enabled; this module
//! adapts its byte-range events into nodes that carry one [`SourceSpan`] per
//! physical line, which is what the projector works from.

pub mod ast;
pub mod builder;
pub mod kinds;
pub mod rope;
pub mod snapshot;

pub use ast::{Ast, Node, NodeKind, SourceSpan};
pub use rope::{LineOffsets, Span};

use crate::error::ParseError;
use builder::AstBuilder;

/// Bounds applied before and during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Longest accepted input, in bytes.
    pub max_input_len: usize,
    /// Deepest accepted node nesting, the document root included.
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_input_len: 256 * 1024,
            max_depth: 64,
        }
    }
}

/// Parses `text` with the default limits.
pub fn parse_document(text: &str) -> Result<Ast, ParseError> {
    let offsets = LineOffsets::build(text);
    parse_with_offsets(text, &offsets, ParseLimits::default())
}

/// Parses `text` against a line table already built for it.
pub fn parse_with_offsets(
    text: &str,
    offsets: &LineOffsets,
    limits: ParseLimits,
) -> Result<Ast, ParseError> {
    if text.len() > limits.max_input_len {
        return Err(ParseError::InputTooLarge {
            len: text.len(),
            limit: limits.max_input_len,
        });
    }
    let ast = AstBuilder::new(text, offsets, limits.max_depth).build()?;
    log::trace!("parsed {} bytes, depth {}", text.len(), ast.depth);
    Ok(ast)
}
