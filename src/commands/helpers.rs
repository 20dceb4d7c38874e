//! Helper functions shared across commands

use std::env;
use std::io::{self, IsTerminal, Read};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use daybook_core::error::{JournalError, Result};
use daybook_core::search::DateRange;

/// External editor command, if one was asked for
///
/// `--editor` wins over `editor.command` in config. A flag given without a
/// value falls back to EDITOR, then VISUAL.
pub fn resolve_editor(
    editor_flag: Option<&str>,
    configured: Option<&str>,
) -> Result<Option<String>> {
    match editor_flag.or(configured) {
        None => Ok(None),
        Some(cmd) if !cmd.trim().is_empty() => Ok(Some(cmd.to_string())),
        Some(_) => env::var("EDITOR")
            .or_else(|_| env::var("VISUAL"))
            .ok()
            .filter(|e| !e.trim().is_empty())
            .map(Some)
            .ok_or_else(|| {
                JournalError::UsageError(
                    "no editor configured. Set EDITOR or VISUAL, or use --editor <cmd>"
                        .to_string(),
                )
            }),
    }
}

/// Current local time truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Read all of stdin when it is piped; `None` for an interactive terminal
pub fn read_piped_stdin() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .map_err(|e| JournalError::io_operation("read", "stdin", e))?;
    Ok(Some(text))
}

/// Entry body as typed or piped: trailing line breaks dropped
pub fn clean_body(text: &str) -> String {
    text.trim_end_matches(['\n', '\r']).to_string()
}

/// `--from`/`--to` into a range, rejecting an inverted one
pub fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<DateRange> {
    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            return Err(JournalError::UsageError(format!(
                "--from {} is after --to {}",
                f, t
            )));
        }
    }
    Ok(DateRange::new(from, to))
}
