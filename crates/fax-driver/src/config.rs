//! Shared CLI surface for `fax-front` and `fax-back` (`SPEC_FULL.md` §11).
//!
//! Both binaries parse into the same `Config`: three required paths, no
//! flags beyond them, no config file. `RUST_LOG` is the only other input
//! that affects behavior, and it is read by the `EnvFilter` installed in
//! `logging.rs`, not by this struct.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Config {
    /// Path the tracing subscriber writes log lines to.
    #[arg(long = "log")]
    pub log: PathBuf,

    /// Input file: source text for `fax-front`, interchange text for `fax-back`.
    #[arg(long = "in")]
    pub input: PathBuf,

    /// Output file: interchange text from `fax-front`, assembly from `fax-back`.
    #[arg(long = "out")]
    pub output: PathBuf,
}
