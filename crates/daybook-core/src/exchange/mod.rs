//! Export to and import from markdown or JSON

pub mod import;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::entry::{serialize, Entry, JournalFile};
use crate::error::{JournalError, Result};

pub use import::{import_entries, parse_import, ImportSummary};

/// Exchange file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    Markdown,
    Json,
}

impl ExchangeFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExchangeFormat::Markdown => "md",
            ExchangeFormat::Json => "json",
        }
    }
}

impl FromStr for ExchangeFormat {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExchangeFormat::Markdown),
            "json" => Ok(ExchangeFormat::Json),
            other => Err(JournalError::invalid_value(
                "exchange format (expected markdown or json)",
                other,
            )),
        }
    }
}

impl fmt::Display for ExchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeFormat::Markdown => write!(f, "markdown"),
            ExchangeFormat::Json => write!(f, "json"),
        }
    }
}

/// One entry in a JSON export
#[derive(Debug, Clone, Serialize)]
pub struct ExportedEntry<'a> {
    pub date: NaiveDate,
    /// Zero-based position within the day
    pub index: usize,
    #[serde(flatten)]
    pub entry: &'a Entry,
}

/// Section heading that introduces one day in a markdown export
pub fn section_heading(date: NaiveDate) -> String {
    format!("## {}", date.format("%Y-%m-%d"))
}

/// Render files as markdown: a heading per day followed by its entry blocks
pub fn export_markdown<'a>(files: impl IntoIterator<Item = &'a JournalFile>) -> String {
    let mut out = String::new();
    for file in files.into_iter().filter(|f| !f.is_empty()) {
        out.push_str(&section_heading(file.date));
        out.push_str("\n\n");
        for entry in file.iter() {
            out.push_str(&serialize(entry));
        }
    }
    out
}

/// Render files as a pretty-printed JSON array
pub fn export_json<'a>(files: impl IntoIterator<Item = &'a JournalFile>) -> Result<String> {
    let entries: Vec<ExportedEntry<'_>> = files
        .into_iter()
        .flat_map(|file| {
            file.iter().enumerate().map(move |(index, entry)| ExportedEntry {
                date: file.date,
                index,
                entry,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

pub fn export<'a>(
    files: impl IntoIterator<Item = &'a JournalFile>,
    format: ExchangeFormat,
) -> Result<String> {
    match format {
        ExchangeFormat::Markdown => Ok(export_markdown(files)),
        ExchangeFormat::Json => export_json(files),
    }
}

/// Default export filename, e.g. `journal_export_20240301_080000.md`
pub fn default_export_name(format: ExchangeFormat, now: NaiveDateTime) -> String {
    format!(
        "journal_export_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
