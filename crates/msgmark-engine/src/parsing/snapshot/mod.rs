//! # Snapshot Testing Support
//!
//! - **`outline`**: a stable, indented text rendering of a parsed tree for
//!   `insta` inline snapshots, built from a `Snap` tree.
//! - **`invariants`**: runtime checks that every span lies in bounds and that
//!   child ranges nest inside their parents.

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::{Snap, normalize, outline};
