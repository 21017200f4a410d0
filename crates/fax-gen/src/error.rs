//! Error type for assembly generation.
//!
//! The generator assumes a well-formed AST (`SPEC_FULL.md` §4.3's failure
//! semantics): violated invariants are `debug_assert!` failures, never
//! ordinary results. The only genuine runtime failure left is the output
//! stream refusing a write.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed writing generated assembly: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
