use std::sync::OnceLock;

use regex::Regex;

/// A list marker found at the start of a line slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    /// Offset one past the marker and the whitespace run after it.
    pub end: usize,
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"^([ \t]*)([-+*]|[0-9]{1,9}[.)])([ \t]*)").expect("Invalid list marker regex")
    })
}

impl ListMarker {
    pub const BULLET: &'static str = "- ";
    pub const ORDERED: &'static str = "1. ";

    /// Reads a bullet (`-`, `+`, `*`) or ordinal (`1.`, `2)`) marker.
    pub fn parse(s: &str) -> Option<ListMarker> {
        let caps = marker_regex().captures(s)?;
        let marker = caps.get(2)?;
        let end = caps.get(3).map_or(marker.end(), |m| m.end());
        Some(ListMarker { end })
    }

    /// Formats the ordinal label shown for item `n` in render mode.
    pub fn ordinal_label(n: u64) -> String {
        format!("{n}. ")
    }
}
