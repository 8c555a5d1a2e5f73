pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineOffsets, LineRef};
pub use slice::preview;
pub use span::Span;
