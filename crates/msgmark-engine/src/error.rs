use thiserror::Error;

/// Failures of the grammar parser. None of these reach callers of the
/// formatter directly; they degrade the call to a passthrough instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("parser produced range {start}..{end} which is not valid in a {len} byte buffer")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("nesting depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Returned instead of a projection when markdown styling cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("markdown styling skipped: {reason}")]
pub struct Degraded {
    #[from]
    pub reason: ParseError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_wraps_parse_error() {
        let degraded: Degraded = ParseError::TooDeep {
            depth: 70,
            limit: 64,
        }
        .into();
        assert_eq!(
            degraded.to_string(),
            "markdown styling skipped: nesting depth 70 exceeds the limit of 64"
        );
    }
}
