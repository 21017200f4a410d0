//! Diagnostic reporting (`SPEC_FULL.md` §7).
//!
//! Each core crate boundary owns one `thiserror` enum; `DriverError`
//! aggregates them with `#[from]` so `?` works across the pipeline, and
//! `diagnostic` renders the single `<file>:<line>:<col>: <kind>: <message>`
//! line the driver prints before exiting nonzero.

use std::path::{Path, PathBuf};

use fax_util::Pos;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Lex(#[from] fax_lex::LexError),

    #[error(transparent)]
    Parse(#[from] fax_par::ParseError),

    #[error(transparent)]
    Interchange(#[from] fax_ast::InterchangeError),

    #[error(transparent)]
    Gen(#[from] fax_gen::GenError),

    #[error("cannot open input {path}: {source}")]
    OpenInput { path: PathBuf, #[source] source: std::io::Error },

    #[error("cannot open output {path}: {source}")]
    OpenOutput { path: PathBuf, #[source] source: std::io::Error },

    #[error("cannot write output {path}: {source}")]
    WriteOutput { path: PathBuf, #[source] source: std::io::Error },
}

impl DriverError {
    fn pos(&self) -> Option<Pos> {
        match self {
            DriverError::Lex(e) => Some(e.pos),
            DriverError::Parse(e) => Some(e.pos()),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DriverError::Lex(_) => "LexicalError",
            DriverError::Parse(fax_par::ParseError::UnresolvedIdentifier { .. }) => {
                "UnresolvedIdentifier"
            }
            DriverError::Parse(fax_par::ParseError::UnexpectedToken { .. }) => "SyntaxError",
            DriverError::Interchange(_) => "SyntaxError",
            DriverError::Gen(_)
            | DriverError::OpenInput { .. }
            | DriverError::OpenOutput { .. }
            | DriverError::WriteOutput { .. } => "IoError",
        }
    }

    /// `<file>:<line>:<col>: <kind>: <message>`. Errors with no intrinsic
    /// source position (I/O, interchange decode) report at `Pos::START`.
    pub fn diagnostic(&self, file: &Path) -> String {
        let pos = self.pos().unwrap_or(Pos::START);
        format!("{}:{}: {}: {}", file.display(), pos, self.kind(), self)
    }
}
