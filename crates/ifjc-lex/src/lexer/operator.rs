//! Operator and separator lexing.
//!
//! Separators are the pure grouping/structural punctuators `( ) , :`;
//! everything else recognized here is an `Operator`, including the
//! two-character forms `==`, `~=`, `<=`, `>=`, `..`, and `//` (§4.1's
//! `Op1..OpF4` macro-states).

use super::core::Lexer;
use crate::token::{Token, TokenKind};
use ifjc_util::ExitCode;

impl<'a> Lexer<'a> {
    pub(super) fn lex_operator_or_separator(&mut self, first: u8) -> Token {
        let pos = self.token_start;
        match first {
            b'(' => self.single(TokenKind::Separator, "("),
            b')' => self.single(TokenKind::Separator, ")"),
            b',' => self.single(TokenKind::Separator, ","),
            b':' => self.single(TokenKind::Separator, ":"),
            b'+' => self.single(TokenKind::Operator, "+"),
            b'-' => self.single(TokenKind::Operator, "-"),
            b'*' => self.single(TokenKind::Operator, "*"),
            b'^' => self.single(TokenKind::Operator, "^"),
            b'%' => self.single(TokenKind::Operator, "%"),
            b'#' => self.single(TokenKind::Operator, "#"),
            b'/' => {
                self.cursor.bump();
                if self.cursor.eat(b'/') {
                    Token::new(TokenKind::Operator, "//", pos)
                } else {
                    Token::new(TokenKind::Operator, "/", pos)
                }
            }
            b'=' => {
                self.cursor.bump();
                if self.cursor.eat(b'=') {
                    Token::new(TokenKind::Operator, "==", pos)
                } else {
                    Token::new(TokenKind::Operator, "=", pos)
                }
            }
            b'~' => {
                self.cursor.bump();
                if self.cursor.eat(b'=') {
                    Token::new(TokenKind::Operator, "~=", pos)
                } else {
                    self.report_error(ExitCode::Lexical, "'~' must be followed by '=' ");
                    Token::new(TokenKind::Error, "~", pos)
                }
            }
            b'<' => {
                self.cursor.bump();
                if self.cursor.eat(b'=') {
                    Token::new(TokenKind::Operator, "<=", pos)
                } else {
                    Token::new(TokenKind::Operator, "<", pos)
                }
            }
            b'>' => {
                self.cursor.bump();
                if self.cursor.eat(b'=') {
                    Token::new(TokenKind::Operator, ">=", pos)
                } else {
                    Token::new(TokenKind::Operator, ">", pos)
                }
            }
            b'.' => {
                self.cursor.bump();
                if self.cursor.eat(b'.') {
                    Token::new(TokenKind::Operator, "..", pos)
                } else {
                    self.report_error(ExitCode::Lexical, "'.' must be followed by '.'");
                    Token::new(TokenKind::Error, ".", pos)
                }
            }
            other => {
                self.cursor.bump();
                self.report_error(
                    ExitCode::Lexical,
                    format!("unexpected character '{}'", other as char),
                );
                Token::new(TokenKind::Unknown, (other as char).to_string(), pos)
            }
        }
    }

    fn single(&mut self, kind: TokenKind, lexeme: &'static str) -> Token {
        let pos = self.token_start;
        self.cursor.bump();
        Token::new(kind, lexeme, pos)
    }
}
