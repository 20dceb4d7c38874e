use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;

use super::parse::{parse_date, parse_exchange_format, parse_index, parse_length, parse_timestamp};
use daybook_core::exchange::ExchangeFormat;
use daybook_core::search::LengthBucket;

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Entry title
    pub title: Option<String>,

    /// Tags (can be specified multiple times)
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// Entry body; read from stdin when piped, otherwise opens the editor
    #[arg(long, short)]
    pub content: Option<String>,

    /// Start from a built-in template (see `daybook templates`)
    #[arg(long)]
    pub template: Option<String>,

    /// Timestamp instead of now, "YYYY-MM-DD HH:MM[:SS]"
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,

    /// External editor command; without a value uses $EDITOR / $VISUAL
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub editor: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only this day
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,

    /// First day to include
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day to include
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Entries with any of these tags
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,
}

/// An entry addressed as `<date> <number>`
#[derive(Args, Debug, Clone)]
pub struct EntryArgs {
    /// Day of the entry (YYYY-MM-DD, today, yesterday)
    #[arg(value_parser = parse_date)]
    pub date: NaiveDate,

    /// Entry number within the day, starting at 1
    #[arg(value_parser = parse_index)]
    pub index: usize,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub entry: EntryArgs,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// Replace the tags (can be specified multiple times)
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// Replace the body without opening an editor
    #[arg(long, short)]
    pub content: Option<String>,

    /// External editor command; without a value uses $EDITOR / $VISUAL
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub editor: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Case-insensitive text to find in titles, bodies and tags
    pub query: Option<String>,

    /// Entries with any of these tags
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// First day to include
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day to include
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Body length: short (<100 words), medium (100-500), long (>500)
    #[arg(long, value_parser = parse_length, conflicts_with_all = ["min_words", "max_words"])]
    pub length: Option<LengthBucket>,

    /// Minimum body words
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Maximum body words
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Case-sensitive regular expression over bodies
    #[arg(long, short)]
    pub regex: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// markdown or json
    #[arg(long = "as", value_parser = parse_exchange_format, default_value = "markdown")]
    pub kind: ExchangeFormat,

    /// First day to include
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day to include
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Output file, or `-` for stdout (default: exports/journal_export_<time>)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// File to import
    pub path: PathBuf,

    /// markdown or json (default: from the file extension)
    #[arg(long = "as", value_parser = parse_exchange_format)]
    pub kind: Option<ExchangeFormat>,
}
