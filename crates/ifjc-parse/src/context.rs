//! Per-function parsing context: the declared signature being checked
//! against, and the `found_return` tracking of §4.3's conditional/loop
//! rules.

#[derive(Clone, Debug)]
pub struct FunctionCtx {
    pub name: String,
    pub param_types: String,
    pub return_types: String,
    /// AND-ed across `if`/`else` branches as the body is walked; a
    /// function with non-empty `return_types` that reaches `end`
    /// without this set gets a missing-return warning.
    pub found_return: bool,
}

impl FunctionCtx {
    pub fn new(name: impl Into<String>, param_types: impl Into<String>, return_types: impl Into<String>) -> Self {
        FunctionCtx {
            name: name.into(),
            param_types: param_types.into(),
            return_types: return_types.into(),
            found_return: false,
        }
    }
}
