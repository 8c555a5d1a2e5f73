use super::span::Span;

/// One physical line of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef {
    /// Offset of the first byte of the line.
    pub start: usize,
    /// Offset one past the last content byte (the separator is excluded).
    pub content_end: usize,
    /// Offset one past the separator; equals `content_end` on the last line.
    pub end: usize,
}

impl LineRef {
    /// Byte span of the line content, separator excluded.
    pub fn content(self) -> Span {
        Span::new(self.start, self.content_end)
    }

    /// Byte span of the separator terminating this line (possibly empty).
    pub fn separator(self) -> Span {
        Span::new(self.content_end, self.end)
    }
}

/// Start offset of every line in a buffer snapshot.
///
/// Lines are split on `\r\n`, `\r` and `\n` alike, so mixed separators map
/// consistently. A buffer that ends with a separator owns one more, empty,
/// line after it. The table describes exactly one buffer version and must be
/// rebuilt after any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsets {
    lines: Vec<LineRef>,
    len: usize,
}

impl LineOffsets {
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            let sep_len = match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
                b'\r' | b'\n' => 1,
                _ => 0,
            };
            if sep_len == 0 {
                i += 1;
                continue;
            }
            lines.push(LineRef {
                start,
                content_end: i,
                end: i + sep_len,
            });
            i += sep_len;
            start = i;
        }

        // Trailing line: either the unterminated remainder or the empty line
        // that follows a final separator.
        lines.push(LineRef {
            start,
            content_end: bytes.len(),
            end: bytes.len(),
        });

        Self {
            lines,
            len: bytes.len(),
        }
    }

    /// Number of lines, always at least one.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the buffer this table was built for.
    pub fn buffer_len(&self) -> usize {
        self.len
    }

    pub fn line(&self, line: usize) -> Option<LineRef> {
        self.lines.get(line).copied()
    }

    pub fn lines(&self) -> impl Iterator<Item = LineRef> + '_ {
        self.lines.iter().copied()
    }

    /// Absolute start offset of `line`; lines past the end map to the buffer end.
    pub fn line_start(&self, line: usize) -> usize {
        self.line(line).map_or(self.len, |l| l.start)
    }

    /// Offset where the content of `line` ends (before its separator).
    pub fn line_end(&self, line: usize) -> usize {
        self.line(line).map_or(self.len, |l| l.content_end)
    }

    /// Length in bytes of the separator closing `line` (0, 1 or 2).
    pub fn separator_len(&self, line: usize) -> usize {
        self.line(line).map_or(0, |l| l.separator().len())
    }

    /// `table[line] + column`, clamped to `[0, len]`.
    pub fn line_column_to_offset(&self, line: usize, column: usize) -> usize {
        self.line_start(line).saturating_add(column).min(self.len)
    }

    /// Index of the line containing `offset`. Offsets inside a separator
    /// belong to the line the separator terminates.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        match self.lines.binary_search_by(|l| l.start.cmp(&offset)) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Content of `line` sliced out of `text`, or `""` when out of range.
    pub fn line_text<'t>(&self, text: &'t str, line: usize) -> &'t str {
        self.line(line)
            .and_then(|l| text.get(l.start..l.content_end))
            .unwrap_or("")
    }

    /// True when `line` exists and holds nothing but whitespace.
    pub fn is_blank(&self, text: &str, line: usize) -> bool {
        line < self.lines.len() && self.line_text(text, line).trim().is_empty()
    }
}
