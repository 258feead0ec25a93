//! `suitspeak history` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::journal::TranslationJournal;

/// Execute the `history` command.
///
/// Reads the translation log without touching the model, so no API key is
/// required.
///
/// # Errors
///
/// Returns an error string if the log exists but cannot be read or parsed.
pub fn run(limit: Option<usize>, log_path: &Path) -> Result<(), String> {
    let ctx = ServiceContext::offline();
    run_with_context(&ctx, limit, log_path)
}

/// Execute the `history` command with the given service context.
///
/// # Errors
///
/// Returns an error string if the log exists but cannot be read or parsed.
pub fn run_with_context(
    ctx: &ServiceContext,
    limit: Option<usize>,
    log_path: &Path,
) -> Result<(), String> {
    let journal = TranslationJournal::new(ctx, log_path);
    let records = journal.read_records()?;

    if records.is_empty() {
        println!("No translations logged yet.");
        return Ok(());
    }

    let skip = limit.map_or(0, |l| records.len().saturating_sub(l));
    for record in &records[skip..] {
        println!("{}  {}  ->  {}", record.timestamp, record.input, record.output);
    }
    Ok(())
}
