//! Span-isolated edits of daily file text
//!
//! Each operation returns the new full text. Bytes outside the affected span
//! are copied through unchanged, so hand-formatted neighbours survive.

use crate::error::{JournalError, Result};

use super::serialize::serialize;
use super::{Entry, JournalFile, Span};

/// Append an entry block at the end of `raw`.
///
/// A blank line separates the block from any existing text.
pub fn insert_append(raw: &str, entry: &Entry) -> String {
    let block = serialize(entry);
    let separator = if raw.is_empty() || raw.ends_with("\n\n") {
        ""
    } else if raw.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    let mut out = String::with_capacity(raw.len() + separator.len() + block.len());
    out.push_str(raw);
    out.push_str(separator);
    out.push_str(&block);
    out
}

/// Replace the entry at zero-based `index` with `entry`
pub fn replace(file: &JournalFile, index: usize, entry: &Entry) -> Result<String> {
    let span = span_of(file, index)?;
    Ok(splice(&file.raw_text, span, &serialize(entry)))
}

/// Remove the entry at zero-based `index`
pub fn delete(file: &JournalFile, index: usize) -> Result<String> {
    let span = span_of(file, index)?;
    Ok(splice(&file.raw_text, span, ""))
}

fn span_of(file: &JournalFile, index: usize) -> Result<Span> {
    file.entries
        .get(index)
        .map(|e| e.span)
        .ok_or(JournalError::EntryNotFound {
            date: file.date,
            index,
            count: file.entries.len(),
        })
}

fn splice(raw: &str, span: Span, replacement: &str) -> String {
    let mut out = String::with_capacity(raw.len() - span.len() + replacement.len());
    out.push_str(&raw[..span.start]);
    out.push_str(replacement);
    out.push_str(&raw[span.end..]);
    out
}
