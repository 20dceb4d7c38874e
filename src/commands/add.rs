//! `daybook add` - append a new entry to the day of its timestamp
//!
//! The body comes from `--content`, else piped stdin, else an editor.

use serde_json::json;

use crate::cli::{AddArgs, Cli};
use crate::commands::edit::compose;
use crate::commands::format::{output_by_format, print_json_status};
use crate::commands::helpers::{clean_body, now, read_piped_stdin};
use daybook_core::entry::{fold_title, Entry};
use daybook_core::error::{JournalError, Result};
use daybook_core::store::Journal;
use daybook_core::templates;

pub fn execute(cli: &Cli, journal: &Journal, args: &AddArgs) -> Result<()> {
    let draft = draft_entry(args, args.at.unwrap_or_else(now))?;

    let body = match &args.content {
        Some(content) => Some(clean_body(content)),
        None if args.editor.is_some() => None,
        None => read_piped_stdin()?.map(|text| clean_body(&text)),
    };
    let entry = match body {
        Some(body) => draft.with_content(body),
        None => match compose(journal, draft, args.editor.as_deref())? {
            Some(entry) => entry,
            None => {
                if !cli.quiet {
                    eprintln!("Cancelled; nothing added");
                }
                return Ok(());
            }
        },
    };

    let location = journal.add_entry(entry.clone())?;
    // stored tags may include detected ones
    let stored = journal.load(location.date)?.file.entry(location.index).cloned();
    let tags = stored.map(|e| e.tags).unwrap_or(entry.tags);

    output_by_format!(cli.format,
        json => print_json_status(
            "ok",
            Some("Entry added"),
            &[
                ("date", json!(location.date)),
                ("number", json!(location.index + 1)),
                ("timestamp", json!(entry.timestamp)),
                ("title", json!(entry.title)),
                ("tags", json!(tags)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("Added {} #{}: {}", location.date, location.index + 1, entry.title);
            }
        }
    )
}

/// Title and tags from flags, pre-filled from a template when one is named
fn draft_entry(args: &AddArgs, timestamp: chrono::NaiveDateTime) -> Result<Entry> {
    let mut entry = match (&args.template, &args.title) {
        (Some(key), title) => {
            let template =
                templates::find(key).ok_or_else(|| JournalError::not_found("template", key))?;
            let mut entry = template.to_entry(timestamp);
            if let Some(title) = title {
                entry.title = fold_title(title);
            }
            entry
        }
        (None, Some(title)) => Entry::new(timestamp, title.as_str()),
        (None, None) => daybook_core::bail_usage!("give a title or --template"),
    };
    entry = entry.with_tags(args.tag.iter().cloned());
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args() -> AddArgs {
        AddArgs {
            title: None,
            tag: Vec::new(),
            content: None,
            template: None,
            at: None,
            editor: None,
        }
    }

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_title_is_required_without_template() {
        assert!(draft_entry(&args(), ts()).is_err());
    }

    #[test]
    fn test_template_prefills_and_flags_add_tags() {
        let mut a = args();
        a.template = Some("gratitude".into());
        a.tag = vec!["evening".into()];
        let entry = draft_entry(&a, ts()).unwrap();
        let template = templates::find("gratitude").unwrap();
        assert_eq!(entry.title, template.title);
        assert_eq!(entry.content, template.content);
        assert_eq!(entry.tags.last().map(String::as_str), Some("evening"));
        assert_eq!(entry.timestamp, ts());
    }

    #[test]
    fn test_title_flag_overrides_template_title() {
        let mut a = args();
        a.template = Some("gratitude".into());
        a.title = Some("Thankful".into());
        assert_eq!(draft_entry(&a, ts()).unwrap().title, "Thankful");
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let mut a = args();
        a.template = Some("nope".into());
        assert!(matches!(
            draft_entry(&a, ts()),
            Err(JournalError::NotFound { .. })
        ));
    }
}
