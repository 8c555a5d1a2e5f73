use crate::parsing::rope::Span;

/// Replace `span` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub span: Span,
    pub insert: String,
}

impl Splice {
    pub fn new(span: Span, insert: impl Into<String>) -> Self {
        Self {
            span,
            insert: insert.into(),
        }
    }

    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    fn is_noop(&self) -> bool {
        self.span.is_empty() && self.insert.is_empty()
    }
}

/// A set of splices against one buffer version, applied together as a
/// single delta.
///
/// Splices are sorted by start and never overlap. Overlapping deletions are
/// merged; any other splice overlapping an earlier one is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    splices: Vec<Splice>,
    /// Bytes inserted by splices `0..=i`.
    added: Vec<usize>,
    /// Bytes removed by splices `0..=i`.
    removed: Vec<usize>,
}

impl Patch {
    pub fn new(splices: impl IntoIterator<Item = Splice>, len: usize) -> Self {
        let mut pending: Vec<Splice> = splices
            .into_iter()
            .map(|s| Splice {
                span: s.span.clamp_to(len),
                ..s
            })
            .filter(|s| !s.is_noop())
            .collect();
        pending.sort_by_key(|s| s.span.start);

        let mut splices: Vec<Splice> = Vec::with_capacity(pending.len());
        for splice in pending {
            match splices.last_mut() {
                Some(prev) if splice.span.start < prev.span.end => {
                    if prev.insert.is_empty() && splice.insert.is_empty() {
                        prev.span.end = prev.span.end.max(splice.span.end);
                    } else {
                        log::debug!("dropping {splice:?}, it overlaps {prev:?}");
                    }
                }
                _ => splices.push(splice),
            }
        }

        let (mut added, mut removed) = (0usize, 0usize);
        let (added, removed) = splices
            .iter()
            .map(|s| {
                added += s.insert.len();
                removed += s.span.len();
                (added, removed)
            })
            .unzip();
        Self {
            splices,
            added,
            removed,
        }
    }

    pub fn single(splice: Splice, len: usize) -> Self {
        Self::new([splice], len)
    }

    pub fn splices(&self) -> &[Splice] {
        &self.splices
    }

    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }

    /// Maps an offset of the version this patch applies to onto the next one.
    ///
    /// Offsets before a splice are unchanged and offsets after it shift by the
    /// length difference. An offset at the start of a splice stays there; an
    /// offset inside the replaced range moves to the end of the inserted text.
    pub fn map_offset(&self, offset: usize) -> usize {
        // Splices starting strictly before `offset`; all but the last of them
        // end at or before it.
        let passed = self.splices.partition_point(|s| s.span.start < offset);
        let Some(k) = passed.checked_sub(1) else {
            return offset;
        };
        let last = &self.splices[k];
        if offset < last.span.end {
            let before = self.added[k] - last.insert.len();
            let gone = self.removed[k] - last.span.len();
            return last.span.start + before - gone + last.insert.len();
        }
        offset + self.added[k] - self.removed[k]
    }

    pub fn map_span(&self, span: Span) -> Span {
        let start = self.map_offset(span.start);
        Span::new(start, self.map_offset(span.end).max(start))
    }
}
