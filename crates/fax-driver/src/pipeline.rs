//! The two pipeline halves `fax-front` and `fax-back` each run once.
//!
//! Strictly sequential, first-error-short-circuits (`SPEC_FULL.md` §5): a
//! `DriverError` returned here is the caller's cue to print one diagnostic
//! line and exit nonzero, never to retry or partially recover.

use std::fs;

use tracing::debug;

use crate::config::Config;
use crate::error::DriverError;

/// Source text in, tree-interchange text out.
pub fn front(config: &Config) -> Result<(), DriverError> {
    let source = fs::read_to_string(&config.input).map_err(|source| DriverError::OpenInput {
        path: config.input.clone(),
        source,
    })?;

    debug!(path = %config.input.display(), "lexing");
    let (tokens, idents) = fax_lex::lex(&source)?;

    debug!(tokens = tokens.len(), "parsing");
    let ast = fax_par::parse(tokens, idents)?;

    let text = ast.serialize();
    fs::write(&config.output, text).map_err(|source| DriverError::WriteOutput {
        path: config.output.clone(),
        source,
    })
}

/// Tree-interchange text in, assembly out.
pub fn back(config: &Config) -> Result<(), DriverError> {
    let text = fs::read_to_string(&config.input).map_err(|source| DriverError::OpenInput {
        path: config.input.clone(),
        source,
    })?;

    debug!(path = %config.input.display(), "parsing interchange form");
    let ast = fax_ast::Ast::parse_interchange(&text)?;

    debug!("codegen");
    let mut out = fs::File::create(&config.output).map_err(|source| DriverError::OpenOutput {
        path: config.output.clone(),
        source,
    })?;
    fax_gen::emit(&ast, &mut out)?;
    Ok(())
}
