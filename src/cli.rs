//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `suitspeak`.
#[derive(Debug, Parser)]
#[command(name = "suitspeak", version, about = "Rewrite casual phrases into corporate register")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a casual phrase into corporate speak.
    Translate {
        /// The phrase to translate.
        phrase: String,
        /// Path to the translation log file.
        #[arg(long, default_value = "translation_log.csv")]
        log: PathBuf,
    },
    /// List the built-in example phrases.
    Examples,
    /// Show entries from the translation log, oldest first.
    History {
        /// Show only the most recent N entries.
        #[arg(long)]
        limit: Option<usize>,
        /// Path to the translation log file.
        #[arg(long, default_value = "translation_log.csv")]
        log: PathBuf,
    },
}
