//! Whitespace and comment skipping.
//!
//! Line comments start with `--`; block comments are `--[[ … ]]` and may
//! span multiple lines. An EOF reached while still inside a block
//! comment is a lexical error (§4.1).

use super::core::Lexer;
use ifjc_util::ExitCode;

impl<'a> Lexer<'a> {
    /// Skip whitespace and comments. Returns `Some(())` on success, or
    /// `None` if EOF was reached inside an unterminated block comment —
    /// the caller is responsible for turning that into an `Error` token.
    pub(super) fn skip_whitespace_and_comments(&mut self) -> Result<(), ()> {
        loop {
            match self.cursor.peek() {
                Some(b) if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' => {
                    self.cursor.bump();
                }
                Some(b'-') if self.cursor.peek_next() == Some(b'-') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    if self.cursor.peek() == Some(b'[') && self.cursor.peek_next() == Some(b'[') {
                        self.cursor.bump();
                        self.cursor.bump();
                        self.skip_block_comment_body()?;
                    } else {
                        self.skip_line_comment_body();
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line_comment_body(&mut self) {
        while let Some(b) = self.cursor.peek() {
            if b == b'\n' {
                break;
            }
            self.cursor.bump();
        }
    }

    fn skip_block_comment_body(&mut self) -> Result<(), ()> {
        loop {
            match self.cursor.peek() {
                None => {
                    self.report_error(ExitCode::Lexical, "unterminated block comment");
                    return Err(());
                }
                Some(b']') if self.cursor.peek_next() == Some(b']') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
    }
}
