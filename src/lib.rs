//! Core library for the `taskboard` CLI.
//!
//! The board engine lives in [`board`]: a pure classifier and filter
//! pipeline, derived bucket state, and an optimistic mutation
//! coordinator. External boundaries are the port traits in [`ports`],
//! with live HTTP adapters and deterministic in-memory adapters in
//! [`adapters`].

pub mod adapters;
pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod model;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_renders_the_board() {
        let result = run(["taskboard", "board"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["taskboard", "unknown"]);
        assert!(result.is_err());
    }
}
