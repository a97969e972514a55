//! Cursor positions and per-line access into a source buffer.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Same line, different column.
    #[inline]
    pub const fn with_col(self, col: u32) -> Self {
        Self { line: self.line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text
    len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// The byte range of a line, excluding its terminator.
    pub fn line_range(&self, text: &str, line: u32) -> Option<TextRange> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map(|&next| next - TextSize::from(1))
            .unwrap_or(self.len);
        // Tolerate CRLF endings.
        let end = if end > start && text.as_bytes().get(usize::from(end) - 1) == Some(&b'\r') {
            end - TextSize::from(1)
        } else {
            end
        };
        Some(TextRange::new(start, end))
    }

    /// The text of a line, excluding its terminator.
    pub fn line_text<'a>(&self, text: &'a str, line: u32) -> Option<&'a str> {
        let range = self.line_range(text, line)?;
        text.get(std::ops::Range::<usize>::from(range))
    }

    /// The text of `position`'s line up to the cursor.
    ///
    /// Columns past the end of the line clamp to the line end, and a column
    /// inside a multi-byte character clamps back to the character start.
    pub fn text_before<'a>(&self, text: &'a str, position: LineCol) -> Option<&'a str> {
        let line = self.line_text(text, position.line)?;
        let mut col = (position.col as usize).min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        Some(&line[..col])
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Check if there are no lines (empty file).
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        assert_eq!(format!("{}", LineCol::new(0, 0)), "1:1");
        assert_eq!(format!("{}", LineCol::new(5, 10)), "6:11");
    }

    #[test]
    fn test_line_index_multi_line() {
        let text = "hello\nworld\n!";
        let index = LineIndex::new(text);
        let range = |start: u32, end: u32| Some(TextRange::new(TextSize::from(start), TextSize::from(end)));

        assert_eq!(index.len(), 3);
        assert_eq!(index.line_range(text, 1), range(6, 11));
        assert_eq!(index.line_range(text, 2), range(12, 13));
    }

    #[test]
    fn test_line_text() {
        let text = "a = 1\r\nplot(close)\nlast";
        let index = LineIndex::new(text);

        assert_eq!(index.line_text(text, 0), Some("a = 1"));
        assert_eq!(index.line_text(text, 1), Some("plot(close)"));
        assert_eq!(index.line_text(text, 2), Some("last"));
        assert_eq!(index.line_text(text, 3), None);
    }

    #[test]
    fn test_text_before_clamps() {
        let text = "x = ta.sma\nü";
        let index = LineIndex::new(text);

        assert_eq!(index.text_before(text, LineCol::new(0, 6)), Some("x = ta"));
        assert_eq!(index.text_before(text, LineCol::new(0, 99)), Some("x = ta.sma"));
        // column 1 falls inside the two-byte 'ü'
        assert_eq!(index.text_before(text, LineCol::new(1, 1)), Some(""));
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.len(), 1);
        assert_eq!(index.line_text("", 0), Some(""));
    }
}
