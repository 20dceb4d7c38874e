//! Journal entries and the daily files that hold them
//!
//! A daily file is a flat sequence of entry blocks:
//!
//! ```text
//! # [2024-03-01 08:15:00] Morning
//!
//! tags: work, planning
//!
//! Body text, any markdown.
//!
//! ```
//!
//! Parsing recovers every block together with its exact byte span so that a
//! single entry can be replaced or removed without touching its neighbours.

pub mod mutate;
pub mod parse;
pub mod serialize;
pub mod tags;

use std::ops::Range;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};

pub use mutate::{delete, insert_append, replace};
pub use parse::{parse, AnomalyKind, ParseAnomaly, ParseOutcome};
pub use serialize::{normalize, render, serialize};
pub use tags::{extract_tags, merge_tags, TagExtractor};

/// chrono format of the timestamp inside an entry header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Collapse a title onto one line.
///
/// Each run of line breaks becomes a single space and the ends are trimmed,
/// since a header holds exactly one line.
pub fn fold_title(title: &str) -> String {
    title
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// One journaled unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Header timestamp; duplicates within a file are allowed
    pub timestamp: NaiveDateTime,
    /// Free text, may be empty
    pub title: String,
    /// Ordered, case-sensitively deduplicated tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Body text, never interpreted beyond locating the next header
    #[serde(default)]
    pub content: String,
}

impl Entry {
    /// Create an entry with no tags and no content
    pub fn new(timestamp: NaiveDateTime, title: impl Into<String>) -> Self {
        Entry {
            timestamp,
            title: fold_title(&title.into()),
            tags: Vec::new(),
            content: String::new(),
        }
    }

    /// Add tags, keeping first occurrences only
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let incoming: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.tags = merge_tags(&self.tags, &incoming);
        self
    }

    /// Set the body text
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Bring an entry to the shape a written header can hold: whole
    /// seconds and a single-line title
    pub fn normalized(mut self) -> Self {
        self.timestamp = self
            .timestamp
            .with_nanosecond(0)
            .unwrap_or(self.timestamp);
        self.title = fold_title(&self.title);
        self
    }

    /// Reject fields that would not read back unchanged after a write
    pub fn validate(&self) -> Result<()> {
        if self.title.contains(['\n', '\r']) || self.title.trim() != self.title {
            return Err(JournalError::invalid_value("title", format!("{:?}", self.title)));
        }
        for tag in &self.tags {
            if tag.is_empty() || tag.contains([',', '\n', '\r']) || tag.trim() != tag {
                return Err(JournalError::invalid_value("tag", format!("{tag:?}")));
            }
        }
        Ok(())
    }

    /// Calendar date of the header timestamp
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Words in the body
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    /// Format tags as comma-separated values, using "-" for no tags
    pub fn format_tags(&self) -> String {
        if self.tags.is_empty() {
            "-".to_string()
        } else {
            self.tags.join(", ")
        }
    }
}

/// Byte range of one entry inside its file's raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// An entry as found in a file: payload plus the bytes it occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedEntry {
    pub entry: Entry,
    pub span: Span,
}

/// The parsed contents of one daily file
#[derive(Debug, Clone)]
pub struct JournalFile {
    /// Day this file belongs to, from its filename
    pub date: NaiveDate,
    /// Location on disk, if the file came from one
    pub path: Option<PathBuf>,
    /// Full file content as read
    pub raw_text: String,
    /// Entries in file order
    pub entries: Vec<SpannedEntry>,
    /// Recoverable problems found while parsing
    pub anomalies: Vec<ParseAnomaly>,
}

impl JournalFile {
    /// Parse `raw_text` as the file for `date`
    pub fn parse(date: NaiveDate, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let outcome = parse(&raw_text);
        for anomaly in &outcome.anomalies {
            tracing::warn!(%date, line = anomaly.line, kind = ?anomaly.kind, text = %anomaly.text, "parse anomaly");
        }
        JournalFile {
            date,
            path: None,
            raw_text,
            entries: outcome.entries,
            anomalies: outcome.anomalies,
        }
    }

    /// An empty file for `date` (no entries yet)
    pub fn empty(date: NaiveDate) -> Self {
        Self::parse(date, String::new())
    }

    /// Attach the on-disk location
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Entry at zero-based `index`
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index).map(|e| &e.entry)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entry payloads in file order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Exact source text of the entry at `index`
    pub fn source_of(&self, index: usize) -> Option<&str> {
        self.entries
            .get(index)
            .map(|e| &self.raw_text[e.span.range()])
    }
}
