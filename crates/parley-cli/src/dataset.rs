//! Newline-delimited JSON input and output.

use crate::error::{CliError, Result};
use parley_domain::{Record, SourceClause};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

/// A non-blank line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the file
    pub number: usize,
    /// Line content, trimmed
    pub text: String,
}

/// Every non-blank line of a file.
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if !text.is_empty() {
            lines.push(Line {
                number: i + 1,
                text: text.to_string(),
            });
        }
    }
    Ok(lines)
}

/// Source clauses from `path`, skipping `start_offset` and keeping at most
/// `max_samples`.
pub fn read_clauses(
    path: &Path,
    start_offset: usize,
    max_samples: Option<usize>,
) -> Result<Vec<SourceClause>> {
    read_lines(path)?
        .into_iter()
        .skip(start_offset)
        .take(max_samples.unwrap_or(usize::MAX))
        .map(|line| {
            serde_json::from_str(&line.text).map_err(|e| {
                CliError::InvalidInput(format!(
                    "{}:{}: not a source clause: {}",
                    path.display(),
                    line.number,
                    e
                ))
            })
        })
        .collect()
}

/// Content keys of the clauses already present in a dataset.
///
/// Keys are recomputed from `original_clause_data` rather than trusted from
/// `clause_hash`. Unreadable lines are skipped with a warning; a missing
/// file has no keys.
pub fn existing_keys(path: &Path) -> Result<HashSet<Uuid>> {
    let mut keys = HashSet::new();
    if !path.exists() {
        return Ok(keys);
    }

    for line in read_lines(path)? {
        let clause = serde_json::from_str::<Value>(&line.text)
            .ok()
            .and_then(|mut record| record.get_mut("original_clause_data").map(Value::take))
            .and_then(|data| serde_json::from_value::<SourceClause>(data).ok());
        match clause {
            Some(clause) => {
                keys.insert(clause.content_key());
            }
            None => warn!("Skipping unreadable line {} of {}", line.number, path.display()),
        }
    }
    Ok(keys)
}

/// Appends records to a dataset, one JSON object per line.
pub struct RecordWriter {
    writer: BufWriter<File>,
}

impl RecordWriter {
    /// Open `path` for appending, creating it and its directory if needed.
    pub fn append(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Write one record and flush, so an interrupted run loses nothing.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
