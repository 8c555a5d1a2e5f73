/// ATX heading syntax knowledge.
pub struct AtxHeading;

/// Position of an ATX marker relative to the slice it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtxMarker {
    /// Offset one past the whitespace run that follows the `#` run.
    pub end: usize,
}

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    /// Levels above this are parsed but never styled.
    pub const MAX_STYLED_LEVEL: u8 = 5;

    /// Reads a heading marker at the start of `s`, after any leading
    /// whitespace. Setext headings never start with `#`, so they yield `None`.
    pub fn marker(s: &str) -> Option<AtxMarker> {
        let b = s.as_bytes();
        let indent = b.iter().take_while(|&&c| c == b' ' || c == b'\t').count();
        if b.get(indent) != Some(&Self::MARKER) {
            return None;
        }
        let mut end = indent + b[indent..].iter().take_while(|&&c| c == Self::MARKER).count();
        end += b[end..].iter().take_while(|&&c| c == b' ' || c == b'\t').count();
        Some(AtxMarker { end })
    }

    /// The literal prefix inserted for a heading of `level`.
    pub fn prefix(level: u8) -> String {
        let mut s = "#".repeat(usize::from(level.max(1)));
        s.push(' ');
        s
    }
}
