//! Binary entrypoint for the `suitspeak` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording is handled in the translate command via SUITSPEAK_RECORD=<dir>.
    match suitspeak::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
