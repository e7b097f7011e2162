/// Line/column positions for tokens and reference listings.
///
/// Offsets are byte offsets into the document text; lines and columns are
/// 0-indexed, with columns counted in bytes from the start of the line.
use text_size::TextSize;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Maps byte offsets to line/column pairs.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line; always starts with 0.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(TextSize::new(i as u32 + 1)),
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(TextSize::new(i as u32 + 2));
                    i += 1;
                }
                b'\r' => line_starts.push(TextSize::new(i as u32 + 1)),
                _ => {}
            }
            i += 1;
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert an offset to a line/column pair. Offsets past the end clamp to
    /// the end of the text.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol::new(line as u32, col.into())
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_mixed_line_endings() {
        let index = LineIndex::new("ab\ncd\r\nef\rg");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(TextSize::new(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::new(4)), LineCol::new(1, 1));
        assert_eq!(index.line_col(TextSize::new(7)), LineCol::new(2, 0));
        assert_eq!(index.line_col(TextSize::new(10)), LineCol::new(3, 0));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("abc");
        assert_eq!(index.line_col(TextSize::new(99)), LineCol::new(0, 3));
    }

    #[test]
    fn test_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(TextSize::new(0)), LineCol::new(0, 0));
    }
}
