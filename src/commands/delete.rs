//! `daybook delete <date> <n>` - remove one entry

use serde_json::json;

use crate::cli::{Cli, DeleteArgs};
use crate::commands::format::{output_by_format, print_json_status};
use daybook_core::error::Result;
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal, args: &DeleteArgs) -> Result<()> {
    let (date, index) = (args.entry.date, args.entry.index);
    let removed = journal.delete_entry(date, index, None)?;

    output_by_format!(cli.format,
        json => print_json_status(
            "ok",
            Some("Entry deleted"),
            &[
                ("date", json!(date)),
                ("number", json!(index + 1)),
                ("title", json!(removed.title)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!("Deleted {} #{}: {}", date, index + 1, removed.title);
            }
        }
    )
}
