//! Command Line Interface (CLI) layer for l3acomp.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the glue (`runner`) that turns the parsed flags into a
//! `CompositeConfig` and runs it with real processes.
//!
//! If you are embedding l3acomp into another application, call
//! `l3acomp::run_composite` directly instead of going through the CLI.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
