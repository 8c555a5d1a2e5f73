/// Blockquote syntax knowledge.
///
/// All blockquote-related delimiter knowledge lives here, not scattered
/// across the builder and the projector.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Skips up to `count` blockquote prefixes, returning the byte offset
    /// where the remaining content begins.
    ///
    /// Handles `> text`, `>> nested` and `> > spaced nested`. Stops early
    /// when the line carries fewer prefixes (lazy continuation lines).
    pub fn skip_prefixes(s: &str, count: usize) -> usize {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut seen = 0usize;

        while seen < count {
            let mut j = i;
            while j < b.len() && (b[j] == b' ' || b[j] == b'\t') {
                j += 1;
            }
            if j < b.len() && b[j] == Self::PREFIX as u8 {
                j += 1;
                if j < b.len() && b[j] == b' ' {
                    j += 1;
                }
                i = j;
                seen += 1;
            } else {
                break;
            }
        }
        i
    }

    /// Length of the marker at the start of `s`: leading whitespace, the `>`,
    /// and the whitespace run that follows it. `None` when `s` does not start
    /// with a marker.
    pub fn marker_len(s: &str) -> Option<usize> {
        let b = s.as_bytes();
        let mut i = 0usize;
        while i < b.len() && (b[i] == b' ' || b[i] == b'\t') {
            i += 1;
        }
        if b.get(i) != Some(&(Self::PREFIX as u8)) {
            return None;
        }
        i += 1;
        while i < b.len() && (b[i] == b' ' || b[i] == b'\t') {
            i += 1;
        }
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_no_quote() {
        assert_eq!(BlockQuote::skip_prefixes("hello", 1), 0);
    }

    #[test]
    fn skip_single_quote() {
        assert_eq!(BlockQuote::skip_prefixes("> hello", 1), 2);
    }

    #[test]
    fn skip_only_requested_depth() {
        assert_eq!(BlockQuote::skip_prefixes("> > hello", 1), 2);
        assert_eq!(BlockQuote::skip_prefixes("> > hello", 2), 4);
    }

    #[test]
    fn skip_nested_quote_no_space() {
        assert_eq!(BlockQuote::skip_prefixes(">> hello", 2), 3);
    }

    #[test]
    fn skip_zero_is_identity() {
        assert_eq!(BlockQuote::skip_prefixes("> hello", 0), 0);
    }

    #[test]
    fn marker_len_includes_whitespace_run() {
        assert_eq!(BlockQuote::marker_len(">   quoted"), Some(4));
        assert_eq!(BlockQuote::marker_len("  > x"), Some(4));
        assert_eq!(BlockQuote::marker_len(">"), Some(1));
        assert_eq!(BlockQuote::marker_len("lazy"), None);
    }
}
