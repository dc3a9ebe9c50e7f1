//! String literal lexing with decimal/single-character escape decoding.
//!
//! Per §4.1: only bytes with code ≥ 32 are accepted outside of escapes;
//! the recognized escapes are `\n`, `\t`, `\\`, `\"`, and `\DDD` (a 1-3
//! digit decimal byte code in `1..=255`). The decoded attribute keeps
//! the surrounding quote characters so downstream code can recognize a
//! `String` token's attribute as quoted text at a glance, while the
//! escapes themselves are resolved to their actual byte value.

use super::core::Lexer;
use crate::token::{Token, TokenKind};
use ifjc_util::ExitCode;

impl<'a> Lexer<'a> {
    pub(super) fn lex_string(&mut self) -> Token {
        let pos = self.token_start;
        self.cursor.bump(); // opening quote
        let mut content = String::from("\"");

        loop {
            match self.cursor.peek() {
                None => {
                    self.report_error(ExitCode::Lexical, "unterminated string literal");
                    return Token::new(TokenKind::Error, content, pos);
                }
                Some(b'"') => {
                    self.cursor.bump();
                    content.push('"');
                    return Token::new(TokenKind::String, content, pos);
                }
                Some(b'\\') => {
                    self.cursor.bump();
                    match self.decode_escape() {
                        Ok(decoded) => content.push(decoded),
                        Err(message) => {
                            self.report_error(ExitCode::Lexical, message);
                            return Token::new(TokenKind::Error, content, pos);
                        }
                    }
                }
                Some(b) if b < 32 => {
                    self.report_error(
                        ExitCode::Lexical,
                        format!("invalid byte {} in string literal", b),
                    );
                    return Token::new(TokenKind::Error, content, pos);
                }
                Some(b) => {
                    self.cursor.bump();
                    content.push(b as char);
                }
            }
        }
    }

    /// Decode a single escape sequence (the backslash has already been
    /// consumed). Returns the decoded character or an error message.
    fn decode_escape(&mut self) -> Result<char, String> {
        match self.cursor.peek() {
            Some(b'n') => {
                self.cursor.bump();
                Ok('\n')
            }
            Some(b't') => {
                self.cursor.bump();
                Ok('\t')
            }
            Some(b'\\') => {
                self.cursor.bump();
                Ok('\\')
            }
            Some(b'"') => {
                self.cursor.bump();
                Ok('"')
            }
            Some(b) if b.is_ascii_digit() => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 3 {
                    match self.cursor.peek() {
                        Some(d) if d.is_ascii_digit() => {
                            self.cursor.bump();
                            value = value * 10 + (d - b'0') as u32;
                            digits += 1;
                        }
                        _ => break,
                    }
                }
                if (1..=255).contains(&value) {
                    Ok(char::from_u32(value).unwrap())
                } else {
                    Err(format!("decimal escape \\{} out of range 1..255", value))
                }
            }
            Some(b) => Err(format!("invalid escape sequence '\\{}'", b as char)),
            None => Err("unterminated escape sequence at end of file".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use ifjc_util::Handler;

    fn lex_one(src: &str) -> crate::token::Token {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(src, &mut handler);
        lexer.next_token()
    }

    #[test]
    fn decodes_simple_escapes() {
        let tok = lex_one(r#""a\nb\tc\\d\"e""#);
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.attr, "\"a\nb\tc\\d\"e\"");
    }

    #[test]
    fn decodes_decimal_escape() {
        let tok = lex_one(r#""\65""#);
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.attr, "\"A\"");
    }

    #[test]
    fn rejects_out_of_range_decimal_escape() {
        let tok = lex_one(r#""\256""#);
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn rejects_unterminated_string() {
        let tok = lex_one("\"abc");
        assert_eq!(tok.kind, TokenKind::Error);
    }
}
