//! Byte cursor with row/column tracking and lookahead.
//!
//! This is the "char source" leaf of the pipeline (§2): a character
//! source with row/column tracking and one-token pushback. Lookahead is
//! implemented as non-destructive peeking rather than consume-then-
//! unread, which sidesteps pushback bookkeeping entirely while still
//! only ever looking one byte past the current position.

use ifjc_util::Position;

/// A byte-oriented cursor over source text.
///
/// The source language is treated as a byte stream, so this cursor
/// indexes by byte offset, not by `char`. Multi-byte UTF-8 only ever
/// appears inside string literals, which are copied through verbatim.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    row: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            bytes: source.as_bytes(),
            pos: 0,
            row: 1,
            col: 1,
        }
    }

    /// Peek the current byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Peek one byte past the current one, without consuming anything.
    pub fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Peek `offset` bytes ahead of the current one.
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Consume and return the current byte, advancing row/column.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(b)
    }

    /// Consume the current byte iff it equals `expected`.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        std::str::from_utf8(&self.bytes[start..end]).unwrap_or("")
    }

    pub fn offset(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_row_col_across_newlines() {
        let mut c = Cursor::new("ab\ncd");
        assert_eq!(c.position(), Position::new(1, 1));
        c.bump();
        assert_eq!(c.position(), Position::new(1, 2));
        c.bump();
        assert_eq!(c.position(), Position::new(1, 3));
        c.bump(); // consumes '\n'
        assert_eq!(c.position(), Position::new(2, 1));
    }

    #[test]
    fn peek_does_not_advance() {
        let c = Cursor::new("xy");
        assert_eq!(c.peek(), Some(b'x'));
        assert_eq!(c.peek(), Some(b'x'));
        assert_eq!(c.peek_next(), Some(b'y'));
    }
}
