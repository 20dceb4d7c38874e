//! `daybook backup` - snapshot every daily file

use crate::cli::Cli;
use crate::commands::format::{output_by_format, print_json};
use daybook_core::error::Result;
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal) -> Result<()> {
    let snapshot = journal.backup_all()?;

    output_by_format!(cli.format,
        json => print_json(&snapshot),
        human => {
            if !cli.quiet {
                println!(
                    "Backed up {} file(s) to {}",
                    snapshot.files,
                    snapshot.path.display()
                );
            }
        }
    )
}
