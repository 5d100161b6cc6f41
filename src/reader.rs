//! Transaction source reading lenient JSON transaction files.
//!
//! Input is a sequence of JSON objects, optionally wrapped in one `[` `]`
//! pair. Records are split on `},` so a single malformed record does not
//! poison the rest of the file.

use crate::types::transaction::Transaction;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Transactions read from a source, in source order
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub transactions: Vec<Transaction>,
    /// Records that failed to parse or validate
    pub skipped: usize,
}

/// Reader for transaction files
pub struct TransactionReader;

impl TransactionReader {
    /// Read and parse a transaction file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ReadOutcome> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transaction file {}", path.display()))?;

        let outcome = Self::read_str(&content);
        info!(
            path = %path.display(),
            transactions = outcome.transactions.len(),
            skipped = outcome.skipped,
            "Transaction file loaded"
        );
        Ok(outcome)
    }

    /// Parse transactions from in-memory content
    pub fn read_str(content: &str) -> ReadOutcome {
        let mut outcome = ReadOutcome::default();

        for (index, record) in split_records(content).enumerate() {
            match serde_json::from_str::<Transaction>(&record) {
                Ok(transaction) => outcome.transactions.push(transaction),
                Err(e) => {
                    warn!(record = index, error = %e, "Skipping malformed transaction record");
                    outcome.skipped += 1;
                }
            }
        }

        debug!(
            parsed = outcome.transactions.len(),
            skipped = outcome.skipped,
            "Transaction records parsed"
        );
        outcome
    }
}

/// Split content into per-record JSON fragments.
fn split_records(content: &str) -> impl Iterator<Item = String> + '_ {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    body.split("},")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            if fragment.ends_with('}') {
                fragment.to_string()
            } else {
                format!("{fragment}}}")
            }
        })
}
