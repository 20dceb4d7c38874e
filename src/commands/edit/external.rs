//! Editing a whole entry in an external editor

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use daybook_core::entry::{parse, serialize, Entry};
use daybook_core::error::{JournalError, Result};

/// Open `entry`, serialized, in `editor` and parse the saved result.
///
/// Emptying the file cancels (`None`).
pub fn edit_entry(editor: &str, entry: &Entry) -> Result<Option<Entry>> {
    let path = std::env::temp_dir().join(format!(
        "daybook-{}-{}.md",
        entry.timestamp.format("%Y%m%d_%H%M%S"),
        std::process::id()
    ));
    fs::write(&path, serialize(entry))
        .map_err(|e| JournalError::io_operation("write", path.display(), e))?;

    let result = run_editor(editor, &path).and_then(|()| {
        fs::read_to_string(&path).map_err(|e| JournalError::io_operation("read", path.display(), e))
    });
    if let Err(e) = fs::remove_file(&path) {
        debug!(path = %path.display(), error = %e, "temp file not removed");
    }

    parse_edited(&result?)
}

fn run_editor(editor: &str, path: &Path) -> Result<()> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| JournalError::UsageError("empty editor command".to_string()))?;

    debug!(editor = %editor, path = %path.display(), "open_editor");
    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|e| JournalError::Other(format!("failed to open editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(JournalError::Other(format!(
            "editor '{}' exited with non-zero status: {:?}",
            editor, status
        )));
    }
    Ok(())
}

/// The single entry the editor left behind
fn parse_edited(text: &str) -> Result<Option<Entry>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let outcome = parse(text);
    for anomaly in &outcome.anomalies {
        warn!(line = anomaly.line, kind = ?anomaly.kind, text = %anomaly.text, "edited text");
    }
    let mut entries = outcome.entries;
    match entries.len() {
        1 => Ok(entries.pop().map(|e| e.entry)),
        0 => Err(JournalError::UsageError(
            "edited text has no entry header; keep the \"# [YYYY-MM-DD HH:MM:SS] Title\" line"
                .to_string(),
        )),
        n => Err(JournalError::UsageError(format!(
            "edited text holds {} entries; expected one",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edited_reads_one_entry() {
        let entry = parse_edited("# [2024-03-01 09:00:00] Standup\n\ntags: work\n\nshipped it\n\n")
            .unwrap()
            .unwrap();
        assert_eq!(entry.title, "Standup");
        assert_eq!(entry.tags, vec!["work"]);
        assert_eq!(entry.content, "shipped it");
    }

    #[test]
    fn test_emptied_file_cancels() {
        assert_eq!(parse_edited("  \n\n").unwrap(), None);
    }

    #[test]
    fn test_missing_or_extra_headers_are_rejected() {
        assert!(parse_edited("just some text\n").is_err());
        let two = "# [2024-03-01 09:00:00] A\n\n# [2024-03-01 10:00:00] B\n";
        assert!(parse_edited(two).is_err());
    }
}
