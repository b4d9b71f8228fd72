//! Byte offset to line/column mapping.

use ctruct_ir::Position;

/// Start offsets of every line in a source text.
///
/// Remembers the last position it computed. A query at or after it on the
/// same line counts only the characters in between, so the tokenizer's
/// non-decreasing queries cost linear time in total.
pub(crate) struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<u32>,
    last: Position,
}

impl<'src> LineIndex<'src> {
    /// Build the index. The caller guarantees `source.len() <= u32::MAX`.
    pub(crate) fn new(source: &'src str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| (i + 1) as u32));
        LineIndex {
            source,
            line_starts,
            last: Position::new(1, 1, 0),
        }
    }

    /// 1-based line and column of `offset`. Columns count characters.
    pub(crate) fn position(&mut self, offset: u32) -> Position {
        let offset = offset.min(self.source.len() as u32);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        // Continue from the cached position when it sits earlier on this line.
        let (from, column) = if self.last.line == line as u32 && self.last.offset <= offset {
            (self.last.offset, self.last.column - 1)
        } else {
            (line_start, 0)
        };
        let column = column + self.count_chars(from, offset);
        self.last = Position::new(line as u32, column + 1, offset);
        self.last
    }

    fn count_chars(&self, from: u32, to: u32) -> u32 {
        let bytes = &self.source.as_bytes()[from as usize..to as usize];
        if bytes.is_ascii() {
            return bytes.len() as u32;
        }
        // Continuation bytes never start a character.
        bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count() as u32
    }
}
