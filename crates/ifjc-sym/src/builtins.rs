//! The eight built-in functions available without `require "ifj21"`
//! (§3, "Builtin functions"), with signatures taken verbatim from the
//! original symbol table's `builtin_functions` array: `reads`, `readi`,
//! `readn`, `write`, `tointeger`, `substr`, `ord`, `chr`.

use crate::symbol::{Status, Symbol};
use crate::table::SymbolTable;

/// `(name, param type string, return type string)`.
const BUILTINS: &[(&str, &str, &str)] = &[
    ("chr", "i", "s"),
    ("ord", "si", "i"),
    ("readi", "", "i"),
    ("readn", "", "n"),
    ("reads", "", "s"),
    ("substr", "snn", "s"),
    ("tointeger", "n", "i"),
    ("write", "%", ""),
];

fn signature_of(name: &str) -> Option<(&'static str, &'static str, &'static str)> {
    BUILTINS.iter().copied().find(|(n, _, _)| *n == name)
}

/// Seed a fresh global scope with all eight builtins, already `Defined`.
pub fn load_builtins(dst: &mut SymbolTable) {
    for (name, params, returns) in BUILTINS {
        dst.insert(Symbol::new_func(*name, *params, *returns, Status::Defined));
    }
}

/// True if `name` names a builtin. As a side effect, ensures `dst`
/// carries the builtin's entry (lazily seeding it if a caller built a
/// scope without [`load_builtins`]) so callers can resolve it with a
/// single subsequent lookup.
pub fn check_builtin(name: &str, dst: &mut SymbolTable) -> bool {
    let Some((n, params, returns)) = signature_of(name) else {
        return false;
    };
    if !dst.contains(n) {
        dst.insert(Symbol::new_func(n, params, returns, Status::Defined));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_eight_builtins_load() {
        let mut table = SymbolTable::new();
        load_builtins(&mut table);
        for (name, ..) in BUILTINS {
            assert!(table.contains(name), "missing builtin {name}");
        }
    }

    #[test]
    fn write_is_variadic() {
        let mut table = SymbolTable::new();
        load_builtins(&mut table);
        assert!(table.get("write").unwrap().is_variadic());
    }

    #[test]
    fn substr_takes_string_then_two_numbers() {
        let mut table = SymbolTable::new();
        load_builtins(&mut table);
        assert_eq!(table.get("substr").unwrap().param_types, "snn");
    }

    #[test]
    fn unknown_name_is_not_a_builtin() {
        let mut table = SymbolTable::new();
        assert!(!check_builtin("frobnicate", &mut table));
    }
}
