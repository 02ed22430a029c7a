//! The text buffer seen by the engine.
//!
//! Editors own their buffers; the engine only needs offset → line conversion,
//! line text and a line count. [`SourceDocument`] is the in-memory
//! implementation used by the engine and by tests.

use text_size::TextSize;

use super::line_index::{LineCol, LineIndex};

/// Read access to a text buffer.
pub trait TextDocument {
    /// Full text of the buffer.
    fn text(&self) -> &str;

    /// Number of lines in the buffer.
    fn line_count(&self) -> u32;

    /// 0-indexed line containing `offset`.
    fn offset_to_line(&self, offset: TextSize) -> u32;

    /// Text of `line` without its line break. Out-of-range lines are empty.
    fn line_text(&self, line: u32) -> &str;

    /// Leading whitespace of `line`.
    fn line_indentation(&self, line: u32) -> &str {
        let text = self.line_text(line);
        let trimmed = text.trim_start_matches([' ', '\t']);
        &text[..text.len() - trimmed.len()]
    }
}

/// An owned source text with its line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    index: LineIndex,
}

impl SourceDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let index = LineIndex::new(&text);
        Self { text, index }
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.index.line_col(offset)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextDocument for SourceDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> u32 {
        self.index.line_count()
    }

    fn offset_to_line(&self, offset: TextSize) -> u32 {
        self.index.line_of(offset)
    }

    fn line_text(&self, line: u32) -> &str {
        match self.index.line_range(line, &self.text) {
            Some(range) => &self.text[range],
            None => "",
        }
    }
}

impl From<&str> for SourceDocument {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceDocument {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_and_indentation() {
        let doc = SourceDocument::new("function f() {\n    return 1;\n}\n");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_text(1), "    return 1;");
        assert_eq!(doc.line_indentation(1), "    ");
        assert_eq!(doc.line_indentation(0), "");
        assert_eq!(doc.line_text(10), "");
    }

    #[test]
    fn test_offset_to_line() {
        let doc = SourceDocument::from("a\nb");
        assert_eq!(doc.offset_to_line(TextSize::new(2)), 1);
    }
}
