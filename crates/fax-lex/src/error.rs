//! Lexer error type.

use fax_util::Pos;
use thiserror::Error;

/// The lexer reports at most one error: the first unrecognized byte.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unexpected character {byte:?} at {pos}")]
pub struct LexError {
    pub byte: char,
    pub pos: Pos,
}
