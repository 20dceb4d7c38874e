//! `daybook import <file>` - append entries from a markdown or JSON export

use std::fs;
use std::path::Path;

use crate::cli::{Cli, ImportArgs};
use crate::commands::format::{output_by_format, print_json};
use daybook_core::error::{JournalError, Result};
use daybook_core::exchange::{import_entries, parse_import, ExchangeFormat};
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal, args: &ImportArgs) -> Result<()> {
    let format = match args.kind {
        Some(kind) => kind,
        None => infer_format(&args.path)?,
    };
    let text = fs::read_to_string(&args.path)
        .map_err(|e| JournalError::io_operation("read", args.path.display(), e))?;

    let (entries, anomalies) = parse_import(&text, format)?;
    let mut summary = import_entries(journal, entries)?;
    summary.anomalies.extend(anomalies);

    output_by_format!(cli.format,
        json => print_json(&summary),
        human => {
            for anomaly in &summary.anomalies {
                eprintln!("warning: line {}: {:?}: {}", anomaly.line, anomaly.kind, anomaly.text);
            }
            if !cli.quiet {
                println!(
                    "Imported {} entries ({} duplicates skipped)",
                    summary.imported, summary.skipped_duplicates
                );
            }
        }
    )
}

fn infer_format(path: &Path) -> Result<ExchangeFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ext.parse::<ExchangeFormat>().map_err(|_| {
        JournalError::UsageError(format!(
            "cannot tell the format of {}; pass --as markdown or --as json",
            path.display()
        ))
    })
}
