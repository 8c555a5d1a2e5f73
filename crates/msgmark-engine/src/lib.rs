//! Markdown formatting engine for chat message bodies.
//!
//! - [`parsing`]: grammar parser and the line/offset mapper.
//! - [`projection`]: turns parsed constructs into style and delimiter ranges.
//! - [`render`]: edit-mode and render-mode views built on the projection.
//! - [`editing`]: inserts markdown delimiters around a selection.

pub mod editing;
pub mod error;
pub mod parsing;
pub mod projection;
pub mod render;

// Re-export key types for easier usage
pub use editing::{Construct, Insertion, Mutation, apply_insertion, plan_insertion};
pub use error::{Degraded, ParseError};
pub use parsing::{Ast, LineOffsets, Node, NodeKind, ParseLimits, SourceSpan, Span, parse_document};
pub use projection::{
    Annotation, Color, ParagraphStyle, Projection, StyleKind, StyleRange, project,
};
pub use render::{
    AttributeRange, EditedText, FormatOptions, Formatter, Highlight, Layout, Origin,
    RenderedText, StyledText, TextAttribute,
};
