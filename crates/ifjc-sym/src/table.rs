//! A single scope frame: a name-keyed map plus the index of its parent
//! frame in the enclosing [`crate::stack::SymbolStack`] (§3, "Symbol
//! table").
//!
//! Implemented over [`indexmap::IndexMap`] rather than the original's
//! binary search tree, per §3A — insertion order is preserved (useful
//! for deterministic diagnostics and tests) while lookup stays O(1)
//! amortized. `parent_ind` replaces a pointer-to-parent with a plain
//! index into the stack's frame arena, sidestepping lifetime
//! entanglement entirely.

use crate::symbol::Symbol;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, Symbol>,
    pub parent_ind: Option<usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    pub fn with_parent(parent_ind: Option<usize>) -> Self {
        SymbolTable {
            entries: IndexMap::new(),
            parent_ind,
        }
    }

    pub fn insert(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.entries.insert(symbol.name.clone(), symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.entries.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Symbol> {
        self.entries.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Status;
    use crate::types::DataType;

    #[test]
    fn insert_then_get_roundtrips() {
        let mut t = SymbolTable::new();
        t.insert(Symbol::new_var("x", DataType::Int, "x$0"));
        assert!(t.get("x").is_some());
        assert!(t.get("y").is_none());
    }

    #[test]
    fn remove_drops_entry() {
        let mut t = SymbolTable::new();
        t.insert(Symbol::new_func("f", "i", "i", Status::Defined));
        assert!(t.remove("f").is_some());
        assert!(!t.contains("f"));
    }
}
