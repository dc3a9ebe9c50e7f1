//! ifjc-lex — the lexical analyzer.
//!
//! A deterministic finite-state scanner with one-token lookahead over a
//! byte-oriented char source, producing the tagged token stream the
//! top-down and precedence parsers consume (§4.1). Split into a cursor
//! plus a modular `lexer/` directory, one file per token family,
//! generalized to this compiler's fixed token taxonomy and escape/
//! number grammar.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, KEYWORDS};
