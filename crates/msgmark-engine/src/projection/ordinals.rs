/// Running item numbers for the ordered lists of one projection pass.
///
/// Lists are identified by a synthetic index handed out in traversal order,
/// so nothing is keyed on node identity and nothing outlives the pass.
#[derive(Debug, Default)]
pub struct OrdinalCounters {
    next: Vec<u64>,
}

impl OrdinalCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a list whose first item is numbered `start`.
    pub fn start_list(&mut self, start: u64) -> usize {
        self.next.push(start);
        self.next.len() - 1
    }

    /// The ordinal for the next item of `list`, advancing its counter.
    pub fn next(&mut self, list: usize) -> u64 {
        match self.next.get_mut(list) {
            Some(n) => {
                let current = *n;
                *n = n.saturating_add(1);
                current
            }
            None => 1,
        }
    }

    pub fn list_count(&self) -> usize {
        self.next.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_from_declared_start() {
        let mut counters = OrdinalCounters::new();
        let list = counters.start_list(3);
        assert_eq!(counters.next(list), 3);
        assert_eq!(counters.next(list), 4);
    }

    #[test]
    fn lists_count_independently() {
        let mut counters = OrdinalCounters::new();
        let outer = counters.start_list(1);
        let inner = counters.start_list(1);
        assert_eq!(counters.next(outer), 1);
        assert_eq!(counters.next(inner), 1);
        assert_eq!(counters.next(inner), 2);
        assert_eq!(counters.next(outer), 2);
        assert_eq!(counters.list_count(), 2);
    }

    #[test]
    fn unknown_list_starts_at_one() {
        let mut counters = OrdinalCounters::new();
        assert_eq!(counters.next(9), 1);
    }
}
