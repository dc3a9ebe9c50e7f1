//! A single symbol-table entry (§3, "Symbol").

use crate::types::DataType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Func,
}

/// Declaration/definition/use tracking used for the unused-variable and
/// declared-but-undefined-function checks (§4.2 edge cases).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Declared,
    Defined,
    Used,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub data_type: DataType,
    pub status: Status,
    /// Type string of this function's parameters, left to right. Empty
    /// for variables.
    pub param_types: String,
    /// Type string of this function's return values, left to right.
    /// Empty for variables.
    pub return_types: String,
    pub was_used: bool,
    /// Frame-unique name assigned at insertion time, distinguishing
    /// shadowed locals with the same surface name across nested scopes.
    pub unique_name: String,
    /// True for a `Func` entry that was materialized by a call site
    /// reaching an as-yet-unseen name, rather than by a real `global`
    /// forward declaration or `function` definition. Its `param_types`/
    /// `return_types` are an unconstrained placeholder, so a later real
    /// declaration/definition for the same name must overwrite it
    /// outright instead of being arity/type-checked against it (see
    /// `stmt::reconcile_function_signature`).
    pub from_call_stub: bool,
}

impl Symbol {
    pub fn new_var(name: impl Into<String>, data_type: DataType, unique_name: impl Into<String>) -> Self {
        let name = name.into();
        let unique_name = unique_name.into();
        Symbol {
            name,
            kind: SymbolKind::Var,
            data_type,
            status: Status::Defined,
            param_types: String::new(),
            return_types: String::new(),
            was_used: false,
            unique_name,
            from_call_stub: false,
        }
    }

    pub fn new_func(
        name: impl Into<String>,
        param_types: impl Into<String>,
        return_types: impl Into<String>,
        status: Status,
    ) -> Self {
        let name = name.into();
        Symbol {
            unique_name: name.clone(),
            name,
            kind: SymbolKind::Func,
            data_type: DataType::Undefined,
            status,
            param_types: param_types.into(),
            return_types: return_types.into(),
            was_used: false,
            from_call_stub: false,
        }
    }

    /// A placeholder `Func` entry for a name seen at a call site before
    /// any `global`/`function` for it was seen — see [`Self::from_call_stub`].
    pub fn new_call_stub(name: impl Into<String>) -> Self {
        let mut sym = Self::new_func(name, "", "", Status::Declared);
        sym.from_call_stub = true;
        sym
    }

    pub fn is_variadic(&self) -> bool {
        self.param_types.starts_with(crate::types::VARIADIC)
    }

    pub fn arity(&self) -> usize {
        self.param_types.chars().count()
    }

    pub fn mark_used(&mut self) {
        self.was_used = true;
        self.status = Status::Used;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variadic_function_is_flagged() {
        let write = Symbol::new_func("write", "%", "", Status::Defined);
        assert!(write.is_variadic());
    }

    #[test]
    fn fresh_variable_is_unused() {
        let v = Symbol::new_var("x", DataType::Int, "x$1");
        assert!(!v.was_used);
    }
}
