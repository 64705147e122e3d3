//! CLI Adapter
//!
//! Command-line interface for the analysis run.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::CliApp;

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
