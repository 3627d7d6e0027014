//! Byte offsets and their line/column and UTF-16 equivalents
//!
//! Rowan measures text in UTF-8 bytes. Editors speaking LSP, and the debug
//! tree printer, count UTF-16 code units instead, so a [`LineIndex`] keeps
//! enough about the source to convert between the two.

pub use text_size::{TextRange, TextSize};

/// A zero-based line and byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Fast conversion from byte offsets to line/column and UTF-16 positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets where each line starts
    line_starts: Vec<TextSize>,
    /// Start of every character wider in UTF-8 than in UTF-16, with the
    /// number of bytes saved by UTF-16 up to and including that character
    wide_chars: Vec<(TextSize, u32)>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let mut wide_chars = Vec::new();
        let mut saved = 0u32;
        for (offset, c) in text.char_indices() {
            let offset = TextSize::new(offset as u32);
            if c == '\n' {
                line_starts.push(offset + TextSize::new(1));
            }
            let diff = (c.len_utf8() - c.len_utf16()) as u32;
            if diff > 0 {
                saved += diff;
                wide_chars.push((offset, saved));
            }
        }
        Self {
            line_starts,
            wide_chars,
            len: TextSize::of(text),
        }
    }

    /// Line and byte column of `offset`
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Line and UTF-16 column of `offset`
    pub fn line_col_utf16(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        LineCol {
            line: line as u32,
            col: self.utf16_offset(offset) - self.utf16_offset(self.line_starts[line]),
        }
    }

    /// Byte offset of `line_col`, if the line exists
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        Some((start + TextSize::new(line_col.col)).min(self.len))
    }

    /// Number of UTF-16 code units before `offset`
    ///
    /// `offset` must lie on a character boundary.
    pub fn utf16_offset(&self, offset: TextSize) -> u32 {
        let index = self.wide_chars.partition_point(|(start, _)| *start < offset);
        let saved = match index {
            0 => 0,
            i => self.wide_chars[i - 1].1,
        };
        u32::from(offset) - saved
    }

    /// `range` measured in UTF-16 code units
    pub fn utf16_range(&self, range: TextRange) -> (u32, u32) {
        (self.utf16_offset(range.start()), self.utf16_offset(range.end()))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_of(&self, offset: TextSize) -> usize {
        self.line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_multiline() {
        let index = LineIndex::new("for\n$x\nin");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(5)), LineCol { line: 1, col: 1 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 2, col: 1 });
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_utf16_offsets() {
        // U+00E9 is 2 bytes, U+FFFE is 3 bytes, U+1F600 is 4 bytes
        let text = "\u{e9}\u{fffe}\u{1f600}x";
        let index = LineIndex::new(text);
        assert_eq!(index.utf16_offset(TextSize::new(0)), 0);
        assert_eq!(index.utf16_offset(TextSize::new(2)), 1);
        assert_eq!(index.utf16_offset(TextSize::new(5)), 2);
        assert_eq!(index.utf16_offset(TextSize::new(9)), 4);
        assert_eq!(index.utf16_offset(TextSize::of(text)), 5);
    }

    #[test]
    fn test_line_col_utf16() {
        let index = LineIndex::new("a\n\u{1f600}b");
        let b = TextSize::new(6);
        assert_eq!(index.line_col(b), LineCol { line: 1, col: 4 });
        assert_eq!(index.line_col_utf16(b), LineCol { line: 1, col: 2 });
    }

    #[test]
    fn test_offset_round_trip() {
        let index = LineIndex::new("let $a := 1\nreturn $a");
        let pos = LineCol { line: 1, col: 7 };
        assert_eq!(index.offset(pos), Some(TextSize::new(19)));
        assert_eq!(index.line_col(TextSize::new(19)), pos);
        assert_eq!(index.offset(LineCol { line: 5, col: 0 }), None);
    }
}
