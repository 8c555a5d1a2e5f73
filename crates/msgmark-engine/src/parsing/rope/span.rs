/// A byte range `[start, end)` into a message buffer.
///
/// Every range the engine hands out is a `Span`; slicing the buffer with it
/// reproduces the exact source text it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span positioned at `at`.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Clamps both ends into `[0, len]` and floors `end` to `start`.
    #[must_use]
    pub fn clamp_to(self, len: usize) -> Self {
        let start = self.start.min(len);
        let end = self.end.min(len).max(start);
        Self { start, end }
    }

    /// True when `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_end_back_into_buffer() {
        assert_eq!(Span::new(2, 40).clamp_to(10), Span::new(2, 10));
    }

    #[test]
    fn clamp_floors_inverted_span_to_start() {
        assert_eq!(Span::new(7, 3).clamp_to(10), Span::new(7, 7));
    }

    #[test]
    fn clamp_moves_start_past_end_of_buffer() {
        assert_eq!(Span::new(12, 20).clamp_to(10), Span::new(10, 10));
    }

    #[test]
    fn clamp_through_mutable_references() {
        let mut spans = vec![Span::new(1, 3), Span::new(2, 9)];
        spans.iter_mut().for_each(|s| *s = s.clamp_to(4));
        assert_eq!(spans, vec![Span::new(1, 3), Span::new(2, 4)]);
    }

    #[test]
    fn len_saturates_on_inverted_span() {
        assert_eq!(Span::new(5, 2).len(), 0);
        assert!(Span::new(5, 2).is_empty());
    }

    #[test]
    fn containment() {
        let outer = Span::new(0, 8);
        assert!(outer.contains(Span::new(2, 6)));
        assert!(!outer.contains(Span::new(6, 9)));
        assert!(outer.contains(Span::new(8, 8)));
    }
}
