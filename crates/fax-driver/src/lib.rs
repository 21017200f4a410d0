//! fax-driver - Shared CLI plumbing for the `fax-front` and `fax-back`
//! binaries.
//!
//! Each binary is a thin `main.rs`: parse `Config`, install logging, run one
//! pipeline half, and turn a `DriverError` into the single diagnostic line
//! `SPEC_FULL.md` §7 specifies before exiting nonzero.

mod config;
mod error;
mod logging;
mod pipeline;

pub use config::Config;
pub use error::DriverError;
pub use pipeline::{back, front};

use std::process::ExitCode;

/// Runs `body`, printing one diagnostic line and returning a nonzero exit
/// code on failure; used identically by both binaries' `main`.
pub fn run(config: &Config, body: impl FnOnce(&Config) -> Result<(), DriverError>) -> ExitCode {
    if let Err(e) = logging::init(&config.log) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match body(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(%e, "pipeline stage failed");
            eprintln!("{}", e.diagnostic(&config.input));
            ExitCode::FAILURE
        }
    }
}
