//! Offset to line/column conversion.
//!
//! [`LineIndex`] records the byte offset of every line start once, then
//! answers lookups with a binary search. The lexer and the diagnostic
//! renderer both go through it, so positions agree everywhere.

use crate::{Location, Position, Span};

/// Pre-computed line start table for one source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// `starts[n]` is the byte offset where line `n` begins. Always has at
    /// least one entry (line 0 at offset 0).
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Build the table by scanning `source` for `\n`.
    pub fn build(source: &str) -> Self {
        let mut starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex {
            starts,
            len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    /// Number of lines (a trailing newline opens one more, empty line).
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 0-based position of a byte offset.
    ///
    /// The line is the number of newlines before `offset`; the column is the
    /// distance from the last line start. Offsets past the end clamp to the
    /// end of the text.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let start = self.starts.get(line).copied().unwrap_or(0);
        Position::new(u32::try_from(line).unwrap_or(u32::MAX), offset - start)
    }

    /// Byte offset of a position, if its line exists.
    pub fn offset(&self, position: Position) -> Option<u32> {
        let start = *self.starts.get(position.line as usize)?;
        Some(start.saturating_add(position.column).min(self.len))
    }

    /// Begin and end positions of a span.
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.position(span.start), self.position(span.end))
    }

    /// Text of line `line` without its terminating newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let idx = line as usize;
        let start = *self.starts.get(idx)? as usize;
        let end = self
            .starts
            .get(idx + 1)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        source.get(start..end.max(start))
    }
}

#[cfg(test)]
mod tests;
