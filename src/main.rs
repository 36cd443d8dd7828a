#![forbid(unsafe_code)]

//! csift — cloudsift CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("csift: {e}");
        std::process::exit(1);
    }
}
