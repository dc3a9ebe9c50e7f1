//! The full symbol-table stack used by the parser (§3, "Symbol table
//! stack"): a global table, the current local table, and an arena of
//! suspended parent frames threaded by index instead of by pointer, plus
//! the declaration-pending stack used to detect a local variable used
//! before its own initializer has finished evaluating.

use crate::symbol::Symbol;
use crate::table::SymbolTable;
use ifjc_util::Position;

/// An identifier that has been named as a local-variable target but
/// whose defining scope has not yet observed the corresponding
/// initializer expression evaluated. A plain `(name, pos)` pair rather
/// than a borrowed token, so this crate does not need to depend on the
/// lexer's token type.
#[derive(Clone, Debug)]
pub struct PendingDecl {
    pub name: String,
    pub pos: Position,
}

/// Nested lexical scopes for a single-pass compiler with no persisted
/// AST: entering a block snapshots the current local frame into the
/// arena and starts a fresh one parented to it; leaving a block restores
/// the snapshot. `lookup_deep` walks local, then each ancestor via
/// `parent_ind`, then global.
#[derive(Default)]
pub struct SymbolStack {
    frames: Vec<SymbolTable>,
    local: SymbolTable,
    global: SymbolTable,
    pending: Vec<PendingDecl>,
}

impl SymbolStack {
    pub fn new() -> Self {
        SymbolStack {
            frames: Vec::new(),
            local: SymbolTable::new(),
            global: SymbolTable::new(),
            pending: Vec::new(),
        }
    }

    /// Push the current local frame into the arena and start a new,
    /// empty one parented to it.
    pub fn enter_scope(&mut self) {
        let parent_ind = self.frames.len();
        let suspended = std::mem::replace(&mut self.local, SymbolTable::with_parent(Some(parent_ind)));
        self.frames.push(suspended);
    }

    /// Discard the current local frame and restore the most recently
    /// suspended one. A no-op at the outermost (function-body) scope,
    /// where there is nothing left to restore.
    pub fn leave_scope(&mut self) {
        if let Some(restored) = self.frames.pop() {
            self.local = restored;
        }
    }

    pub fn insert_local(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.local.insert(symbol)
    }

    pub fn insert_global(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.global.insert(symbol)
    }

    pub fn remove_local(&mut self, name: &str) -> Option<Symbol> {
        self.local.remove(name)
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.local.get(name)
    }

    pub fn lookup_local_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.local.get_mut(name)
    }

    pub fn lookup_global(&self, name: &str) -> Option<&Symbol> {
        self.global.get(name)
    }

    pub fn lookup_global_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.global.get_mut(name)
    }

    /// Resolve `name` against local scope, then each enclosing scope in
    /// turn, then global — the full visibility rule of §3/§4.3.
    pub fn lookup_deep(&self, name: &str) -> Option<&Symbol> {
        if let Some(sym) = self.local.get(name) {
            return Some(sym);
        }
        let mut next = self.local.parent_ind;
        while let Some(idx) = next {
            let frame = &self.frames[idx];
            if let Some(sym) = frame.get(name) {
                return Some(sym);
            }
            next = frame.parent_ind;
        }
        self.global.get(name)
    }

    /// Like [`Self::lookup_deep`], but also reports whether the hit came
    /// from the global table (as opposed to the local frame or one of
    /// its ancestors) and returns an owned clone — callers that need to
    /// report a diagnostic afterward would otherwise hold a borrow of
    /// `self` across the call.
    pub fn resolve(&self, name: &str) -> Option<(bool, Symbol)> {
        if let Some(sym) = self.local.get(name) {
            return Some((false, sym.clone()));
        }
        let mut next = self.local.parent_ind;
        while let Some(idx) = next {
            let frame = &self.frames[idx];
            if let Some(sym) = frame.get(name) {
                return Some((false, sym.clone()));
            }
            next = frame.parent_ind;
        }
        self.global.get(name).map(|sym| (true, sym.clone()))
    }

    pub fn push_pending(&mut self, decl: PendingDecl) {
        self.pending.push(decl);
    }

    pub fn pop_pending(&mut self) -> Option<PendingDecl> {
        self.pending.pop()
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.iter().any(|p| p.name == name)
    }

    pub fn clear_pending(&mut self, name: &str) {
        self.pending.retain(|p| p.name != name);
    }

    /// Every function name still awaiting its definition, in declaration
    /// order. Walked once at the end of `parse_program` to turn each
    /// still-`Declared` entry into the code-3 error or warning §4.3's
    /// "Function declaration / definition consistency" rule calls for.
    pub fn pending(&self) -> &[PendingDecl] {
        &self.pending
    }

    pub fn global(&self) -> &SymbolTable {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut SymbolTable {
        &mut self.global
    }

    pub fn local(&self) -> &SymbolTable {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut SymbolTable {
        &mut self.local
    }

    pub fn load_builtins(&mut self) {
        crate::builtins::load_builtins(&mut self.global);
    }

    pub fn check_builtin(&mut self, name: &str) -> bool {
        crate::builtins::check_builtin(name, &mut self.global)
    }
}
