//! `daybook show <date> <n>` - print one entry

use serde_json::json;

use crate::cli::{Cli, EntryArgs};
use crate::commands::format::{output_by_format, print_entry, print_json};
use daybook_core::error::{JournalError, Result};
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal, args: &EntryArgs) -> Result<()> {
    let loaded = journal.load(args.date)?;
    let entry = loaded
        .file
        .entry(args.index)
        .ok_or(JournalError::EntryNotFound {
            date: args.date,
            index: args.index,
            count: loaded.file.len(),
        })?;

    output_by_format!(cli.format,
        json => print_json(&json!({
            "date": args.date,
            "number": args.index + 1,
            "timestamp": entry.timestamp,
            "title": entry.title,
            "tags": entry.tags,
            "content": entry.content,
            "word_count": entry.word_count(),
        })),
        human => { print_entry(entry); }
    )
}
