//! `suitspeak examples` command.

use crate::phrasebook;

/// Execute the `examples` command.
///
/// # Errors
///
/// Currently always succeeds; the signature matches the other handlers.
pub fn run() -> Result<(), String> {
    println!("Known example phrases:");
    for (casual, corporate) in phrasebook::EXAMPLES {
        println!("  {casual}  ->  {corporate}");
    }
    Ok(())
}
