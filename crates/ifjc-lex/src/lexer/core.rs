//! The main `Lexer` struct: dispatch, one-token lookahead, error
//! reporting plumbing shared by the other lexer submodules.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use ifjc_util::{ExitCode, Handler, Position};

/// Deterministic finite-state scanner with one-token lookahead.
///
/// Holds a mutable reference to the session [`Handler`] so lexical
/// errors are reported through the same diagnostic path as every other
/// phase (§3A, "diagnostics as the logging layer") instead of failing
/// the scan outright — per §4.1, "on I/O error or unrecognized byte,
/// yields `Error`/`Unknown` tokens rather than failing".
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) handler: &'a mut Handler,
    pub(super) token_start: Position,
    buffered: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: Position::START,
            buffered: None,
        }
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(tok) = self.buffered.take() {
            return tok;
        }
        self.scan_token()
    }

    /// Peek the next token without consuming it. Idempotent until
    /// `next_token` is called.
    pub fn lookahead(&mut self) -> Token {
        if self.buffered.is_none() {
            self.buffered = Some(self.scan_token());
        }
        self.buffered.clone().expect("just populated above")
    }

    /// Reborrow the diagnostic handler this lexer was built with, so a
    /// caller that owns the `Lexer` (rather than the `Handler` itself)
    /// can report parser/semantic diagnostics through the same sink
    /// without the two holding overlapping `&mut Handler`s.
    pub fn handler_mut(&mut self) -> &mut Handler {
        self.handler
    }

    pub(super) fn report_error(&mut self, code: ExitCode, message: impl Into<String>) {
        self.handler.error(code, "lexical", message, self.token_start);
    }

    fn scan_token(&mut self) -> Token {
        if self.skip_whitespace_and_comments().is_err() {
            // Unterminated block comment: report_error already fired
            // inside skip_whitespace_and_comments; surface it as an
            // Error token positioned at EOF.
            let pos = self.cursor.position();
            return Token::new(TokenKind::Error, "", pos);
        }

        self.token_start = self.cursor.position();

        let Some(first) = self.cursor.peek() else {
            return Token::eof(self.token_start);
        };

        if first == b'"' {
            return self.lex_string();
        }
        if self.at_identifier_start() {
            return self.lex_identifier();
        }
        if first.is_ascii_digit() {
            return self.lex_number();
        }
        self.lex_operator_or_separator(first)
    }
}

/// Iterating a `Lexer` yields tokens up to but excluding `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        if tok.is_eof() {
            None
        } else {
            Some(tok)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn tokens(src: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(src, &mut handler);
        let mut out = Vec::new();
        loop {
            let t = lexer.next_token();
            let done = t.is_eof();
            out.push(t);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lookahead_then_next_returns_equal_tokens() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("local x", &mut handler);
        let la = lexer.lookahead();
        let next = lexer.next_token();
        assert_eq!(la, next);
    }

    #[test]
    fn keywords_never_classified_as_identifier() {
        for kw in crate::token::KEYWORDS {
            let toks = tokens(kw);
            assert_eq!(toks[0].kind, TokenKind::Keyword, "keyword {kw} misclassified");
        }
    }

    #[test]
    fn skips_line_and_block_comments() {
        let toks = tokens("-- line comment\nlocal --[[ block\ncomment ]] x");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Keyword, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn tracks_prolog_sequence() {
        let toks = tokens(r#"require "ifj21""#);
        assert_eq!(toks[0].kind, TokenKind::Keyword);
        assert_eq!(toks[0].attr, "require");
        assert_eq!(toks[1].kind, TokenKind::String);
    }

    #[test]
    fn recognizes_two_char_operators() {
        let toks = tokens("== ~= <= >= .. //");
        let attrs: Vec<_> = toks.iter().map(|t| t.attr.as_str()).collect();
        assert_eq!(attrs, vec!["==", "~=", "<=", ">=", "..", "//", ""]);
    }

    #[test]
    fn unterminated_block_comment_is_lexical_error() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("--[[ never closed", &mut handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Error);
        assert_eq!(handler.code(), ExitCode::Lexical);
    }
}
