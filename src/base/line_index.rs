//! Offset ↔ line/column conversion.
//!
//! Lines are 0-indexed. A line ends at `\n`; a preceding `\r` belongs to the
//! line break, not to the line text.

use text_size::{TextRange, TextSize};

/// A 0-indexed line/column pair. Columns are UTF-8 byte offsets into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Precomputed line starts for a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines. An empty text has one (empty) line.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Total length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    /// Line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let offset = offset.min(self.len);
        let idx = self.line_starts.partition_point(|start| *start <= offset);
        idx.saturating_sub(1) as u32
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let start = self.line_starts[line as usize];
        LineCol::new(line, u32::from(offset.min(self.len) - start))
    }

    /// Offset of the first byte of `line`.
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }

    /// Range of `line` without its line break.
    pub fn line_range(&self, line: u32, text: &str) -> Option<TextRange> {
        let start = self.line_start(line)?;
        let mut end = self
            .line_starts
            .get(line as usize + 1)
            .map(|next| *next - TextSize::new(1))
            .unwrap_or(self.len);
        if end > start && text.as_bytes().get(u32::from(end) as usize - 1) == Some(&b'\r') {
            end -= TextSize::new(1);
        }
        Some(TextRange::new(start, end))
    }

    /// Convert a line/column pair back to an offset.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = self.line_start(pos.line)?;
        let offset = start + TextSize::new(pos.col);
        (offset <= self.len).then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_counts_trailing_empty_line() {
        assert_eq!(LineIndex::new("").line_count(), 1);
        assert_eq!(LineIndex::new("a").line_count(), 1);
        assert_eq!(LineIndex::new("a\n").line_count(), 2);
        assert_eq!(LineIndex::new("a\nb\nc").line_count(), 3);
    }

    #[test]
    fn test_line_of_offsets() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_of(TextSize::new(0)), 0);
        assert_eq!(index.line_of(TextSize::new(2)), 0);
        assert_eq!(index.line_of(TextSize::new(3)), 1);
        assert_eq!(index.line_of(TextSize::new(6)), 2);
        assert_eq!(index.line_of(TextSize::new(7)), 3);
        assert_eq!(index.line_of(TextSize::new(100)), 3);
    }

    #[test]
    fn test_line_col_round_trip() {
        let text = "let a = 1;\n  let b = 2;\n";
        let index = LineIndex::new(text);
        let pos = index.line_col(TextSize::new(15));
        assert_eq!(pos, LineCol::new(1, 4));
        assert_eq!(index.offset(pos), Some(TextSize::new(15)));
    }

    #[test]
    fn test_line_range_strips_carriage_return() {
        let text = "one\r\ntwo";
        let index = LineIndex::new(text);
        let range = index.line_range(0, text).unwrap();
        assert_eq!(&text[range], "one");
        let range = index.line_range(1, text).unwrap();
        assert_eq!(&text[range], "two");
        assert!(index.line_range(2, text).is_none());
    }
}
