//! ifjc-parse — the single-pass top-down parser, paired expression
//! parser, and per-compilation parser state (§4.3, §4.4).
//!
//! There is no persisted AST: every production here either emits
//! IFJ-code directly into a [`Program`] as it recognizes a construct,
//! or records what it learned straight into the symbol-table stack.
//! [`stmt::compile`] is the crate's one public entry point for turning
//! a whole source file into a finished program (or a diagnostic exit
//! code); the submodules below it are organized by what each rule
//! family touches rather than by grammar nonterminal.

pub mod bp;
pub mod builtins_codegen;
pub mod context;
pub mod expr;
pub mod parser;
pub mod stmt;

pub use context::FunctionCtx;
pub use parser::Parser;
pub use stmt::{compile, parse_program};

pub use ifjc_code::Program;
