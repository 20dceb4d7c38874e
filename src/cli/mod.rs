//! CLI argument parsing for daybook
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{
    AddArgs, DeleteArgs, EditArgs, EntryArgs, ExportArgs, ImportArgs, ListArgs, SearchArgs,
};
pub use output::OutputFormat;

/// Daybook - dated, tagged journal entries in one markdown file per day
#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Journal directory (default: $DAYBOOK_DIR, then ~/journal)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = output::format_parser())]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace, or a directive)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the journal directory layout and default config
    Init,

    /// Add an entry
    Add(AddArgs),

    /// List entries, oldest first
    List(ListArgs),

    /// Show one entry
    Show(EntryArgs),

    /// Edit an entry (built-in editor, or --editor / $EDITOR)
    Edit(EditArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Search entries; all given filters must match
    Search(SearchArgs),

    /// List tags by use count
    Tags,

    /// Show journal statistics
    Stats,

    /// Export entries as markdown or JSON
    Export(ExportArgs),

    /// Import entries from a markdown or JSON export
    Import(ImportArgs),

    /// Copy every daily file into a timestamped backup directory
    Backup,

    /// List built-in entry templates
    Templates,
}
