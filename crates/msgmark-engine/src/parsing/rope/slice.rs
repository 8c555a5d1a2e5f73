use super::span::Span;

/// Extracts text for a span of a plain string, truncating to `max` bytes
/// (on a char boundary) with a "..." suffix if needed.
///
/// Used for human-readable debug dumps.
pub fn preview(text: &str, sp: Span, max: usize) -> String {
    let sp = sp.clamp_to(text.len());
    let mut s = text.get(sp.start..sp.end).unwrap_or("").to_string();
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", Span::new(0, 5), 10), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", Span::new(0, 11), 5), "hello...");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        // "é" is two bytes; cutting at 1 would split it.
        assert_eq!(preview("éa", Span::new(0, 3), 1), "...");
    }
}
