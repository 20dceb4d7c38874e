//! `daybook edit <date> <n>` - change one entry in place
//!
//! Flags (`--title`, `--tag`, `--content`) edit without opening anything.
//! Otherwise the body opens in the built-in terminal editor, or the whole
//! entry opens in an external editor when `--editor` / `editor.command` is set.

pub mod external;
pub mod terminal;

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tracing::warn;

use crate::cli::{Cli, EditArgs};
use crate::commands::format::{output_by_format, print_json_status};
use crate::commands::helpers::{clean_body, resolve_editor};
use daybook_core::editor::SessionOutcome;
use daybook_core::entry::{fold_title, Entry};
use daybook_core::error::{JournalError, Result};
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal, args: &EditArgs) -> Result<()> {
    let (date, index) = (args.entry.date, args.entry.index);
    let loaded = journal.load(date)?;
    let original = loaded
        .file
        .entry(index)
        .cloned()
        .ok_or(JournalError::EntryNotFound {
            date,
            index,
            count: loaded.file.len(),
        })?;

    let edited = match apply_flags(&original, args) {
        Some(entry) => entry,
        None => match compose(journal, original.clone(), args.editor.as_deref())? {
            Some(entry) => entry,
            None => return report(cli, "cancelled", "Edit cancelled", date, index),
        },
    };
    if edited == original {
        return report(cli, "unchanged", "No changes", date, index);
    }

    if let Err(e) = journal.replace_entry(date, index, edited.clone(), Some(&loaded.signature)) {
        if e.is_conflict() {
            keep_rejected_edit(&edited);
        }
        return Err(e);
    }
    report(cli, "ok", "Entry updated", date, index)
}

/// The entry with flag edits applied; `None` when no flag was given
fn apply_flags(original: &Entry, args: &EditArgs) -> Option<Entry> {
    if args.title.is_none() && args.tag.is_empty() && args.content.is_none() {
        return None;
    }
    let mut entry = original.clone();
    if let Some(title) = &args.title {
        entry.title = fold_title(title);
    }
    if !args.tag.is_empty() {
        entry.tags.clear();
        entry = entry.with_tags(args.tag.iter().cloned());
    }
    if let Some(content) = &args.content {
        entry.content = clean_body(content);
    }
    Some(entry)
}

/// Open an editor on `entry`; `None` when the user cancelled
pub fn compose(journal: &Journal, entry: Entry, editor_flag: Option<&str>) -> Result<Option<Entry>> {
    let settings = &journal.config().editor;
    if let Some(command) = resolve_editor(editor_flag, settings.command.as_deref())? {
        return external::edit_entry(&command, &entry);
    }

    match terminal::edit_body(&entry.title, &entry.content, settings.viewport_height)? {
        SessionOutcome::Save(text) => {
            let content = clean_body(&text);
            Ok(Some(entry.with_content(content)))
        }
        SessionOutcome::Cancelled => Ok(None),
    }
}

/// Write an edit the journal refused so the text is not lost
fn keep_rejected_edit(entry: &Entry) {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "daybook-rejected-{}.md",
        entry.timestamp.format("%Y%m%d_%H%M%S")
    ));
    match fs::write(&path, daybook_core::entry::serialize(entry)) {
        Ok(()) => eprintln!("your edit was kept in {}", path.display()),
        Err(e) => warn!(path = %path.display(), error = %e, "could not keep rejected edit"),
    }
}

fn report(
    cli: &Cli,
    status: &str,
    message: &str,
    date: chrono::NaiveDate,
    index: usize,
) -> Result<()> {
    output_by_format!(cli.format,
        json => print_json_status(
            status,
            Some(message),
            &[("date", json!(date)), ("number", json!(index + 1))],
        ),
        human => {
            if !cli.quiet {
                println!("{}: {} #{}", message, date, index + 1);
            }
        }
    )
}
