//! ifjc-util — ambient support crate shared by every phase of the
//! compiler: diagnostics (this repo's stand-in for a logging layer),
//! source positions, and a typed index-vector utility.
//!
//! Trimmed to what a single-threaded, single-file, no-AST compiler
//! actually needs: no `SourceMap`/multi-file `Span`, no generic
//! diagnostic-builder fluent API — this compiler's classification codes
//! are a small fixed set, not an open-ended vocabulary of diagnostic
//! kinds. Identifiers stay plain, owned `String`s hashed into
//! `indexmap::IndexMap`-backed symbol tables (`ifjc-sym::table`) rather
//! than interned handles — a single-pass compile over one source file
//! never repeats enough identifier traffic for a dedicated interner to
//! pay for itself; see DESIGN.md.

pub mod diag;
pub mod error;
pub mod index_vec;
pub mod position;

pub use diag::{Diagnostic, ExitCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use position::Position;
