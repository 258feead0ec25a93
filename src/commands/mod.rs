//! Command dispatch and handlers.

pub mod examples;
pub mod history;
pub mod translate;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Translate { phrase, log } => translate::run(phrase, log),
        Command::Examples => examples::run(),
        Command::History { limit, log } => history::run(*limit, log),
    }
}
