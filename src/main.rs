//! l3acomp CLI entrypoint.
//!
//! Parses the arguments, runs the composite chain and maps any failure to
//! exit code 1. For programmatic use, prefer the library (`l3acomp::run_composite`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
