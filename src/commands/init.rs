//! `daybook init` - create the journal layout
//!
//! Idempotent: existing entries and config are left alone.

use std::path::Path;

use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{output_by_format, print_json_status};
use daybook_core::error::Result;
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let journal = Journal::init(root)?;

    output_by_format!(cli.format,
        json => print_json_status(
            "ok",
            Some("Journal initialized"),
            &[("root", json!(journal.root().display().to_string()))],
        ),
        human => {
            if !cli.quiet {
                println!("Initialized journal at {}", journal.root().display());
            }
        }
    )
}
