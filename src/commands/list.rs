//! `daybook list` - entries grouped by day, oldest first

use serde::Serialize;

use crate::cli::{Cli, ListArgs};
use crate::commands::format::{entry_line, output_by_format, print_json};
use crate::commands::helpers::date_range;
use daybook_core::entry::{Entry, JournalFile};
use daybook_core::error::Result;
use daybook_core::search::DateRange;
use daybook_core::store::Journal;

#[derive(Debug, Serialize)]
struct ListedEntry<'a> {
    date: chrono::NaiveDate,
    /// One-based, as accepted by `show`, `edit` and `delete`
    number: usize,
    #[serde(flatten)]
    entry: &'a Entry,
    word_count: usize,
}

pub fn execute(cli: &Cli, journal: &Journal, args: &ListArgs) -> Result<()> {
    let range = match args.date {
        Some(day) => DateRange::new(Some(day), Some(day)),
        None => date_range(args.from, args.to)?,
    };
    let loaded = journal.load_range(range)?;
    let files: Vec<&JournalFile> = loaded.iter().map(|l| &l.file).collect();

    let wanted: Vec<String> = args.tag.iter().map(|t| t.to_lowercase()).collect();
    let keep = |entry: &Entry| {
        wanted.is_empty()
            || entry
                .tags
                .iter()
                .any(|t| wanted.contains(&t.to_lowercase()))
    };

    output_by_format!(cli.format,
        json => {
            let listed: Vec<ListedEntry> = files
                .iter()
                .flat_map(|f| {
                    f.iter().enumerate().map(move |(i, e)| ListedEntry {
                        date: f.date,
                        number: i + 1,
                        entry: e,
                        word_count: e.word_count(),
                    })
                })
                .filter(|l| keep(l.entry))
                .collect();
            print_json(&listed)
        },
        human => { print_human(cli, &files, keep); }
    )
}

fn print_human(cli: &Cli, files: &[&JournalFile], keep: impl Fn(&Entry) -> bool) {
    let mut shown = 0;
    for file in files {
        let lines: Vec<String> = file
            .iter()
            .enumerate()
            .filter(|(_, e)| keep(e))
            .map(|(i, e)| entry_line(i, e))
            .collect();
        if lines.is_empty() {
            continue;
        }
        if shown > 0 {
            println!();
        }
        println!("{}", file.date.format("%Y-%m-%d %A"));
        for line in &lines {
            println!("{}", line);
        }
        shown += lines.len();
    }
    if shown == 0 && !cli.quiet {
        println!("No entries found");
    }
}
