/*!
 * # Delimiter Inserter
 *
 * The inverse of formatting: given a buffer, a selection and a construct,
 * work out which markdown delimiters to insert and where.
 *
 * ## Shapes
 *
 * - **Line prefixes** (headings, quotes, list items): one marker per touched
 *   line, placed after that line's indentation. Ordered lists always get
 *   `1. `; render mode renumbers them.
 * - **Paired delimiters** (bold, italic, strikethrough, inline code): each
 *   non-blank line is wrapped on its own, so user line breaks survive.
 * - **Fences**: a code block, or inline code over more than one line, is
 *   wrapped as a whole in a fenced block.
 *
 * ## Buffer versions
 *
 * [`plan_insertion`] states every offset against the buffer produced by the
 * mutations before it. [`apply_insertion`] replays them on an
 * [`EditBuffer`], one version per mutation. Callers re-run formatting on the
 * resulting text; nothing computed for the old text is reused.
 */

pub mod buffer;
pub mod construct;
pub mod patch;
pub mod plan;

pub use buffer::{EditBuffer, SpanId};
pub use construct::{Construct, Shape, UnknownConstruct};
pub use patch::{Patch, Splice};
pub use plan::{Mutation, normalize_selection, plan_insertion};

use crate::parsing::rope::Span;

/// The buffer after an insertion and where the caret ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub caret: usize,
    pub mutations: Vec<Mutation>,
}

/// Applies `construct` to `selection` of `text`.
///
/// With an empty selection the text is returned unchanged and the caret is
/// clamped into it. Otherwise the caret lands after the selection's end,
/// past any delimiter inserted there.
pub fn apply_insertion(text: &str, selection: Span, construct: Construct) -> Insertion {
    let sel = normalize_selection(text, selection);
    let mutations = plan_insertion(text, sel, construct);

    let mut buffer = EditBuffer::new(text);
    let mut caret = sel.end;
    for m in &mutations {
        buffer.insert(m.at, &m.insert);
        if m.at <= caret {
            caret += m.insert.len();
        }
    }
    log::debug!(
        "applied {construct} to {sel:?} with {} mutations",
        mutations.len()
    );

    Insertion {
        text: buffer.text(),
        caret,
        mutations,
    }
}
