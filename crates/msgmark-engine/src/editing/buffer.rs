use xi_rope::Rope;
use xi_rope::delta::Builder;

use super::patch::{Patch, Splice};
use crate::parsing::rope::{LineOffsets, Span};

/// Handle to a span tracked by an [`EditBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(usize);

/// A text buffer whose every edit yields a new version.
///
/// Spans registered with [`track`](Self::track) are re-mapped through each
/// edit, so reading one always gives its position in the current version.
/// Offsets read from an older version must not be reused after an edit.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    rope: Rope,
    version: u64,
    tracked: Vec<Option<Span>>,
}

impl EditBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
            version: 0,
            tracked: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Line table for the current version.
    pub fn line_offsets(&self) -> LineOffsets {
        LineOffsets::build(&self.text())
    }

    pub fn track(&mut self, span: Span) -> SpanId {
        self.tracked.push(Some(span.clamp_to(self.len())));
        SpanId(self.tracked.len() - 1)
    }

    /// Current position of a tracked span.
    pub fn get(&self, id: SpanId) -> Option<Span> {
        self.tracked.get(id.0).copied().flatten()
    }

    pub fn untrack(&mut self, id: SpanId) {
        if let Some(slot) = self.tracked.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Applies every splice of `patch` as one delta, producing one new
    /// version. The patch must have been built against the current length.
    pub fn apply(&mut self, patch: &Patch) {
        if patch.is_empty() {
            return;
        }

        let mut builder = Builder::new(self.rope.len());
        for splice in patch.splices() {
            if splice.insert.is_empty() {
                builder.delete(splice.span.range());
            } else {
                builder.replace(splice.span.range(), Rope::from(splice.insert.as_str()));
            }
        }
        let delta = builder.build();
        self.rope = delta.apply(&self.rope);
        self.version += 1;

        for slot in self.tracked.iter_mut().flatten() {
            *slot = patch.map_span(*slot);
        }
        log::trace!(
            "v{}: applied {} splices, {} spans tracked",
            self.version,
            patch.splices().len(),
            self.tracked.len()
        );
    }

    /// Replaces `span` with `with`, producing the next version.
    pub fn replace(&mut self, span: Span, with: &str) {
        let patch = Patch::single(Splice::new(span, with), self.len());
        self.apply(&patch);
    }

    pub fn delete(&mut self, span: Span) {
        self.replace(span, "");
    }

    pub fn insert(&mut self, at: usize, text: &str) {
        self.replace(Span::empty(at), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replace_bumps_version() {
        let mut buf = EditBuffer::new("- item");
        buf.replace(Span::new(0, 2), "• ");
        assert_eq!(buf.text(), "• item");
        assert_eq!(buf.version(), 1);
    }

    #[test]
    fn noop_edit_keeps_version() {
        let mut buf = EditBuffer::new("abc");
        buf.delete(Span::new(1, 1));
        assert_eq!(buf.version(), 0);
        assert!(!buf.is_empty());
    }

    #[test]
    fn tracked_spans_follow_edits() {
        let mut buf = EditBuffer::new("**bold** tail");
        let content = buf.track(Span::new(2, 6));
        let tail = buf.track(Span::new(9, 13));
        buf.delete(Span::new(0, 2));
        buf.delete(Span::new(4, 6));
        assert_eq!(buf.text(), "bold tail");
        assert_eq!(buf.get(content), Some(Span::new(0, 4)));
        assert_eq!(buf.get(tail), Some(Span::new(5, 9)));
    }

    #[test]
    fn batched_patch_is_one_version() {
        let mut buf = EditBuffer::new("- a\n\n- b");
        let b = buf.track(Span::new(7, 8));
        let patch = Patch::new(
            [
                Splice::new(Span::new(0, 2), "• "),
                Splice::delete(Span::new(4, 5)),
                Splice::new(Span::new(5, 7), "• "),
            ],
            buf.len(),
        );
        buf.apply(&patch);
        assert_eq!(buf.text(), "• a\n• b");
        assert_eq!(buf.version(), 1);
        let b = buf.get(b).unwrap();
        assert_eq!(&buf.text()[b.range()], "b");
    }

    #[test]
    fn untracked_span_is_gone() {
        let mut buf = EditBuffer::new("abc");
        let id = buf.track(Span::new(0, 1));
        buf.untrack(id);
        assert_eq!(buf.get(id), None);
    }

    #[test]
    fn insert_and_line_offsets_rebuild() {
        let mut buf = EditBuffer::new("ab");
        buf.insert(1, "\n");
        assert_eq!(buf.text(), "a\nb");
        assert_eq!(buf.line_offsets().line_count(), 2);
    }

    #[test]
    fn edit_clamps_out_of_range_span() {
        let mut buf = EditBuffer::new("abc");
        buf.delete(Span::new(2, 99));
        assert_eq!(buf.text(), "ab");
    }
}
