//! Binary entrypoint for the `taskboard` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Pick up TASKBOARD_URL / TASKBOARD_TOKEN from a local .env if present.
    dotenvy::dotenv().ok();
    match taskboard::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
