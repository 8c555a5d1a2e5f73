#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// An opening code fence: which character, and how many of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub kind: FenceKind,
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    pub const MIN_LEN: usize = 3;

    /// Reads the opening fence at the start of `line` (leading spaces allowed).
    pub fn open(line: &str) -> Option<Fence> {
        let t = line.trim_start_matches([' ', '\t']);
        let kind = if t.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if t.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = t.bytes().take_while(|&b| b == kind.byte()).count();
        Some(Fence { kind, len })
    }

    /// A block is structurally closed when its last line is exactly the fence
    /// character repeated to the opening fence length.
    pub fn closes(fence: Fence, last_line: &str) -> bool {
        last_line.len() == fence.len && last_line.bytes().all(|b| b == fence.kind.byte())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::open("```rust"),
            Some(Fence {
                kind: FenceKind::Backticks,
                len: 3
            })
        );
    }

    #[test]
    fn detect_long_tilde_fence() {
        assert_eq!(
            CodeFence::open("  ~~~~~"),
            Some(Fence {
                kind: FenceKind::Tildes,
                len: 5
            })
        );
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let fence = CodeFence::open("```").unwrap();
        assert!(CodeFence::closes(fence, "```"));
    }

    #[test]
    fn does_not_close_on_length_or_char_mismatch() {
        let fence = CodeFence::open("````").unwrap();
        assert!(!CodeFence::closes(fence, "```"));
        assert!(!CodeFence::closes(fence, "~~~~"));
        assert!(!CodeFence::closes(fence, "code"));
    }
}
