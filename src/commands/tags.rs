//! `daybook tags` - every tag with its use count

use crate::cli::Cli;
use crate::commands::format::{output_by_format, print_json};
use daybook_core::error::Result;
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal) -> Result<()> {
    let counts = journal.tag_counts()?;

    output_by_format!(cli.format,
        json => print_json(&counts),
        human => {
            if counts.is_empty() && !cli.quiet {
                println!("No tags yet");
            }
            for count in &counts {
                println!("{:>5}  {}", count.count, count.tag);
            }
        }
    )
}
