//! `daybook export` - write entries as markdown or JSON

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::{Cli, ExportArgs};
use crate::commands::format::{output_by_format, print_json_status};
use crate::commands::helpers::{date_range, now};
use daybook_core::entry::JournalFile;
use daybook_core::error::{JournalError, Result};
use daybook_core::exchange::{default_export_name, export};
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal, args: &ExportArgs) -> Result<()> {
    let loaded = journal.load_range(date_range(args.from, args.to)?)?;
    let files: Vec<&JournalFile> = loaded.iter().map(|l| &l.file).collect();
    let entries: usize = files.iter().map(|f| f.len()).sum();
    let text = export(files.iter().copied(), args.kind)?;

    if args.output.as_deref() == Some(Path::new("-")) {
        print!("{}", text);
        return Ok(());
    }

    let path = match &args.output {
        Some(path) => path.clone(),
        None => default_path(journal, args),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| JournalError::io_operation("create", parent.display(), e))?;
    }
    fs::write(&path, &text).map_err(|e| JournalError::io_operation("write", path.display(), e))?;

    output_by_format!(cli.format,
        json => print_json_status(
            "ok",
            Some("Export written"),
            &[
                ("path", json!(path.display().to_string())),
                ("format", json!(args.kind.to_string())),
                ("days", json!(files.len())),
                ("entries", json!(entries)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!(
                    "Exported {} entries from {} day(s) to {}",
                    entries,
                    files.len(),
                    path.display()
                );
            }
        }
    )
}

fn default_path(journal: &Journal, args: &ExportArgs) -> PathBuf {
    journal
        .exports_dir()
        .join(default_export_name(args.kind, now()))
}
