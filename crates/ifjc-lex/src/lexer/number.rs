//! Numeric literal lexing — integers and floats with optional exponent.
//!
//! Grammar (§4.1): `Integer = DIGIT+`; `Number = DIGIT+ ('.' DIGIT+)?
//! ([eE] [+-]? DIGIT+)?` where at least one of the fractional part or
//! the exponent is present. A trailing `e`/`E` with no following digits
//! is a lexical error rather than being left unconsumed.

use super::core::Lexer;
use crate::token::{Token, TokenKind};
use ifjc_util::ExitCode;

impl<'a> Lexer<'a> {
    pub(super) fn lex_number(&mut self) -> Token {
        let start = self.cursor.offset();
        let pos = self.token_start;
        let mut is_float = false;

        self.consume_digits();

        if self.cursor.peek() == Some(b'.') && matches!(self.cursor.peek_next(), Some(b) if b.is_ascii_digit())
        {
            is_float = true;
            self.cursor.bump(); // '.'
            self.consume_digits();
        }

        if matches!(self.cursor.peek(), Some(b'e') | Some(b'E')) {
            let sign_width = if matches!(self.cursor.peek_at(1), Some(b'+') | Some(b'-')) {
                2
            } else {
                1
            };
            if matches!(self.cursor.peek_at(sign_width), Some(b) if b.is_ascii_digit()) {
                is_float = true;
                self.cursor.bump(); // e/E
                if sign_width == 2 {
                    self.cursor.bump(); // sign
                }
                self.consume_digits();
            } else {
                // Consume the dangling exponent marker so the lexer
                // makes forward progress, then report the error.
                self.cursor.bump();
                if sign_width == 2 {
                    self.cursor.bump();
                }
                let end = self.cursor.offset();
                let text = self.cursor.slice(start, end).to_string();
                self.report_error(ExitCode::Lexical, "exponent has no digits");
                return Token::new(TokenKind::Error, text, pos);
            }
        }

        let end = self.cursor.offset();
        let text = self.cursor.slice(start, end).to_string();
        let kind = if is_float {
            TokenKind::Number
        } else {
            TokenKind::Integer
        };
        Token::new(kind, text, pos)
    }

    fn consume_digits(&mut self) {
        while matches!(self.cursor.peek(), Some(b) if b.is_ascii_digit()) {
            self.cursor.bump();
        }
    }
}
