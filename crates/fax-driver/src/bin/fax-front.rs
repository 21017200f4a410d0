//! Source text in, tree-interchange text out.

use std::process::ExitCode;

use clap::Parser;
use fax_driver::Config;

fn main() -> ExitCode {
    let config = Config::parse();
    fax_driver::run(&config, fax_driver::front)
}
