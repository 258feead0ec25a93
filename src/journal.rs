//! Append-only CSV journal of successful translations.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;

/// Header row written once when the store is created.
const HEADER: &str = "Timestamp,Gen Z Phrase,Corporate Translation";

/// Journal timestamp format, second precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted translation exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Wall-clock time of the exchange, second precision.
    pub timestamp: String,
    /// The phrase as submitted.
    pub input: String,
    /// The model's corporate rendition.
    pub output: String,
}

/// Append-only audit trail of successful translations.
///
/// The backing store is a single CSV file created lazily with its header on
/// first append. Appends are row-granular; concurrent appenders from
/// separate sessions are not coordinated.
pub struct TranslationJournal<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> TranslationJournal<'a> {
    /// Creates a journal backed by the given CSV file.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self { ctx, path: path.to_path_buf() }
    }

    /// Appends one translation row, creating the store with its header
    /// first when absent. The timestamp is captured at append time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be created or appended to.
    pub fn append(&self, input: &str, output: &str) -> Result<(), String> {
        if !self.ctx.fs.exists(&self.path) {
            self.ctx.fs.write(&self.path, &format!("{HEADER}\n")).map_err(|e| {
                format!("Failed to create translation log {}: {e}", self.path.display())
            })?;
        }

        let timestamp = self.ctx.clock.now().format(TIMESTAMP_FORMAT).to_string();
        let row = format!(
            "{},{},{}\n",
            escape_field(&timestamp),
            escape_field(input),
            escape_field(output)
        );
        self.ctx.fs.append(&self.path, &row).map_err(|e| {
            format!("Failed to append to translation log {}: {e}", self.path.display())
        })
    }

    /// Reads all records back from the store, oldest first.
    ///
    /// Returns an empty list when the store does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a row is malformed.
    pub fn read_records(&self) -> Result<Vec<TranslationRecord>, String> {
        if !self.ctx.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let content = self.ctx.fs.read_to_string(&self.path).map_err(|e| {
            format!("Failed to read translation log {}: {e}", self.path.display())
        })?;

        let mut rows = parse_rows(&content)
            .map_err(|e| format!("Malformed translation log {}: {e}", self.path.display()))?;
        if !rows.is_empty() {
            rows.remove(0); // header
        }

        rows.into_iter()
            .map(|fields| {
                if fields.len() == 3 {
                    let mut fields = fields.into_iter();
                    Ok(TranslationRecord {
                        timestamp: fields.next().unwrap_or_default(),
                        input: fields.next().unwrap_or_default(),
                        output: fields.next().unwrap_or_default(),
                    })
                } else {
                    Err(format!(
                        "Malformed translation log {}: expected 3 fields, found {}",
                        self.path.display(),
                        fields.len()
                    ))
                }
            })
            .collect()
    }
}

/// Escapes one CSV field, quoting when it contains the delimiter, a quote,
/// or a line break.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Parses CSV content into rows of fields, honoring quoted fields with
/// embedded delimiters, escaped quotes, and line breaks.
fn parse_rows(content: &str) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }
    Ok(rows)
}
