//! Core error types for ifjc-util.
//!
//! This is an internal invariant-violation error, not one of the
//! compiler's user-facing classification codes (see
//! [`crate::diag::ExitCode`] for those) — an `IndexVecError` surfacing
//! all the way to the driver becomes exit code 99 (internal).

use thiserror::Error;

/// Error type for index-vector operations.
#[derive(Debug, Error)]
pub enum IndexVecError {
    #[error("index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
