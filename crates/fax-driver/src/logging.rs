//! Tracing setup (`SPEC_FULL.md` §10), mirroring `faxt`'s
//! `registry().with(filter).with(subscriber).try_init()` shape but writing
//! to the file named by `--log` instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::layer().with_ansi(false).with_writer(move || {
        file.try_clone().expect("log file descriptor should be cloneable")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("failed to install tracing subscriber")
}
