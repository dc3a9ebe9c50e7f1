//! Identifier and keyword lexing.

use super::core::Lexer;
use crate::token::{is_keyword, Token, TokenKind};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.offset();
        let pos = self.token_start;
        while let Some(b) = self.cursor.peek() {
            if is_ident_continue(b) {
                self.cursor.bump();
            } else {
                break;
            }
        }
        let end = self.cursor.offset();
        let text = self.cursor.slice(start, end).to_string();
        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, pos)
    }

    pub(super) fn at_identifier_start(&self) -> bool {
        matches!(self.cursor.peek(), Some(b) if is_ident_start(b))
    }
}
