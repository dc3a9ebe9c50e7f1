//! Binding powers for the expression parser's precedence climbing.
//!
//! Reaches the precedence and associativity this language's grammar
//! calls for through binding-power pairs rather than a table keyed by
//! terminal pairs — one constant per level.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|----------------|
//! | 1 | `==`, `~=`, `<`, `<=`, `>`, `>=` | none (chaining rejected) |
//! | 2 | `..` | Right |
//! | 3 | `+`, `-` | Left |
//! | 4 | `*`, `/`, `//`, `%` | Left |
//! | 5 | unary `-`, `#` | prefix |
//! | 6 | `^` | Right |

/// Minimum binding power (start of expression).
pub const MIN: u8 = 0;

/// Relational/equality operators: `==`, `~=`, `<`, `<=`, `>`, `>=`.
pub const RELATIONAL: u8 = 10;

/// String concatenation: `..`.
pub const CONCAT: u8 = 20;

/// Additive: `+`, `-`.
pub const ADDITIVE: u8 = 30;

/// Multiplicative: `*`, `/`, `//`, `%`.
pub const MULTIPLICATIVE: u8 = 40;

/// Prefix operators: unary `-`, `#`.
pub const UNARY: u8 = 50;

/// Exponentiation: `^`.
pub const POWER: u8 = 60;

/// `(left binding power, right binding power)` for a binary operator
/// lexeme, or `None` if it does not name a binary operator.
pub fn infix_bp(op: &str) -> Option<(u8, u8)> {
    match op {
        "==" | "~=" | "<" | "<=" | ">" | ">=" => Some((RELATIONAL, RELATIONAL + 1)),
        // Right-associative: the right-hand side is parsed at the same
        // binding power so `a .. b .. c` groups as `a .. (b .. c)`.
        ".." => Some((CONCAT, CONCAT)),
        "+" | "-" => Some((ADDITIVE, ADDITIVE + 1)),
        "*" | "/" | "//" | "%" => Some((MULTIPLICATIVE, MULTIPLICATIVE + 1)),
        "^" => Some((POWER, POWER)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let (mul_lbp, _) = infix_bp("*").unwrap();
        let (_, add_rbp) = infix_bp("+").unwrap();
        assert!(mul_lbp > add_rbp);
    }

    #[test]
    fn concat_is_right_associative() {
        let (lbp, rbp) = infix_bp("..").unwrap();
        assert_eq!(lbp, rbp);
    }

    #[test]
    fn additive_is_left_associative() {
        let (lbp, rbp) = infix_bp("+").unwrap();
        assert!(rbp > lbp);
    }
}
