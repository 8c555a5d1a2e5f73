//! Per-construct syntax knowledge.
//!
//! Each construct owns its delimiter constants and marker scanners so the
//! builder, the projector and the inserter agree on what the syntax looks like.

pub mod block_quote;
pub mod code_fence;
pub mod delimited;
pub mod heading;
pub mod list_marker;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, Fence, FenceKind};
pub use delimited::Delimited;
pub use heading::{AtxHeading, AtxMarker};
pub use list_marker::ListMarker;
