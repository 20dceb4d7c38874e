use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::ExchangeFormat;
use crate::entry::parse::parse_header;
use crate::entry::{parse, Entry, ParseAnomaly};
use crate::error::Result;
use crate::store::Journal;

/// Outcome of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub anomalies: Vec<ParseAnomaly>,
}

fn section_date(line: &str) -> Option<NaiveDate> {
    let rest = line.trim_end().strip_prefix("## ")?;
    NaiveDate::parse_from_str(rest.trim(), "%Y-%m-%d").ok()
}

/// Drop the `## <date>` headings an export puts before each day.
///
/// A heading only counts when it opens a new day: it stands alone between
/// blank lines and the next line is a header on that same date. Anything else
/// is body text and is kept.
fn strip_section_headings(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let is_blank = |i: usize| lines.get(i).is_some_and(|l| l.trim().is_empty());
    let header_date = |i: usize| match lines.get(i).and_then(|l| parse_header(l)) {
        Some(Ok(header)) => Some(header.timestamp.date()),
        _ => None,
    };

    let mut out = String::with_capacity(text.len());
    let mut current: Option<NaiveDate> = None;
    let mut i = 0;
    while i < lines.len() {
        if let Some(date) = header_date(i) {
            current = Some(date);
        } else if let Some(date) = section_date(lines[i]) {
            let opens_day = current != Some(date)
                && (i == 0 || is_blank(i - 1))
                && is_blank(i + 1)
                && header_date(i + 2) == Some(date);
            if opens_day {
                i += 2;
                continue;
            }
        }
        out.push_str(lines[i]);
        i += 1;
    }
    out
}

/// Read entries from exchange text.
///
/// Entries come back normalized and every one is checked before any is
/// returned, so a bad record fails the whole import up front.
pub fn parse_import(text: &str, format: ExchangeFormat) -> Result<(Vec<Entry>, Vec<ParseAnomaly>)> {
    let (entries, anomalies) = match format {
        ExchangeFormat::Json => {
            let entries: Vec<Entry> = serde_json::from_str(text)?;
            (entries, Vec::new())
        }
        ExchangeFormat::Markdown => {
            let outcome = parse(&strip_section_headings(text));
            let entries = outcome.entries.into_iter().map(|e| e.entry).collect();
            (entries, outcome.anomalies)
        }
    };
    let entries: Vec<Entry> = entries.into_iter().map(Entry::normalized).collect();
    for entry in &entries {
        entry.validate()?;
    }
    Ok((entries, anomalies))
}

/// Append entries to the days of their timestamps, skipping exact duplicates
pub fn import_entries(journal: &Journal, entries: Vec<Entry>) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    for entry in entries {
        let entry = entry.normalized();
        let loaded = journal.load(entry.date())?;
        let duplicate = loaded.file.iter().any(|existing| {
            existing.timestamp == entry.timestamp
                && existing.title == entry.title
                && existing.content == entry.content
        });
        if duplicate {
            debug!(timestamp = %entry.timestamp, title = %entry.title, "skipping duplicate");
            summary.skipped_duplicates += 1;
            continue;
        }
        journal.add_entry(entry)?;
        summary.imported += 1;
    }
    info!(
        imported = summary.imported,
        skipped = summary.skipped_duplicates,
        "import complete"
    );
    Ok(summary)
}
