//! Source position tracking.
//!
//! The lexer only ever needs the first-character position of a token,
//! not a full start/end byte range, and there is no source-map-backed
//! `Span` with multi-file support here: this compiler only ever sees a
//! single source file piped in from stdin, so a file id/offset table
//! would track nothing a simpler `(row, col)` pair doesn't already give
//! the diagnostics formatter.

use std::fmt;

/// A 1-based row/column position in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const START: Position = Position { row: 1, col: 1 };

    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}
