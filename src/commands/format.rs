//! Shared output formatting helpers for commands

use serde::Serialize;
use serde_json::json;

use daybook_core::entry::Entry;
use daybook_core::error::Result;
use daybook_core::format::truncate_chars;

pub use crate::output_by_format;

/// Width of the title column in entry listings
const TITLE_WIDTH: usize = 60;

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a `{"status": ...}` object with optional message and extra fields
pub fn print_json_status(
    status: &str,
    message: Option<&str>,
    extra_fields: &[(&str, serde_json::Value)],
) -> Result<()> {
    let mut output = json!({ "status": status });

    if let Some(obj) = output.as_object_mut() {
        if let Some(msg) = message {
            obj.insert("message".to_string(), json!(msg));
        }
        for (key, value) in extra_fields {
            obj.insert(key.to_string(), value.clone());
        }
    }

    print_json(&output)
}

/// One listing line: `  3. 08:15:00  Title  [tag, tag]`
///
/// `index` is zero-based; the line shows it one-based.
pub fn entry_line(index: usize, entry: &Entry) -> String {
    let mut line = format!(
        "{:>3}. {}  {}",
        index + 1,
        entry.timestamp.format("%H:%M:%S"),
        truncate_chars(&entry.title, TITLE_WIDTH)
    );
    if !entry.tags.is_empty() {
        line.push_str(&format!("  [{}]", entry.format_tags()));
    }
    line
}

/// Full entry display for `show`
pub fn print_entry(entry: &Entry) {
    println!("{}", entry.title);
    println!("{}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"));
    if !entry.tags.is_empty() {
        println!("tags: {}", entry.format_tags());
    }
    println!("words: {}", entry.word_count());
    if !entry.content.is_empty() {
        println!();
        println!("{}", entry.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry() -> Entry {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        Entry::new(ts, "Morning pages")
    }

    #[test]
    fn test_entry_line_is_one_based() {
        assert_eq!(entry_line(0, &entry()), "  1. 08:15:00  Morning pages");
    }

    #[test]
    fn test_entry_line_shows_tags() {
        let e = entry().with_tags(["work", "ideas"]);
        assert_eq!(entry_line(4, &e), "  5. 08:15:00  Morning pages  [work, ideas]");
    }
}
