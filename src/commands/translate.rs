//! `suitspeak translate` command.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::ApiConfig;
use crate::context::ServiceContext;
use crate::phrasebook;
use crate::translate::Translator;

/// Execute the `translate` command.
///
/// When `SUITSPEAK_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string when the API key is missing (fatal, checked
/// before any remote call) or the async runtime cannot be started. Remote
/// and logging failures are not errors here; they degrade to a visible
/// notice while the command still renders a result.
pub fn run(phrase: &str, log_path: &Path) -> Result<(), String> {
    let api = ApiConfig::from_env()?;

    let (ctx, session) = if let Ok(dir) = env::var("SUITSPEAK_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir), &api)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&api)?, None)
    };

    let result = run_with_context(&ctx, phrase, log_path);

    // Finish recording after the command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        let output_dir = session.finish()?;
        eprintln!("Recording saved to: {}", output_dir.display());
    }

    result
}

/// Execute the `translate` command with the given service context.
///
/// # Errors
///
/// Returns an error string if the async runtime cannot be started.
pub fn run_with_context(
    ctx: &ServiceContext,
    phrase: &str,
    log_path: &Path,
) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let translator = Translator::new(ctx, log_path);
    let outcome = runtime.block_on(translator.translate(phrase));

    for notice in &outcome.notices {
        eprintln!("Warning: {notice}");
    }
    println!("{}", outcome.text);

    if let Some(known) = phrasebook::lookup(phrase) {
        println!("\nCommon corporate phrases like this include:");
        println!("{known}");
    }

    Ok(())
}
