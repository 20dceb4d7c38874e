//! `daybook search` - combined text, tag, date, length and regex filters

use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, SearchArgs};
use crate::commands::format::{output_by_format, print_json};
use crate::commands::helpers::date_range;
use daybook_core::entry::JournalFile;
use daybook_core::error::Result;
use daybook_core::format::truncate_chars;
use daybook_core::search::{
    regex_search, FieldMatch, LengthBucket, MatchField, SearchHit, SearchQuery, SearchReport,
};
use daybook_core::store::Journal;

/// Characters of context shown around a body match
const SNIPPET_WIDTH: usize = 72;

#[derive(Debug, Serialize)]
struct NumberedHit<'a> {
    /// One-based, as accepted by `show`
    number: usize,
    #[serde(flatten)]
    hit: &'a SearchHit,
}

pub fn execute(cli: &Cli, journal: &Journal, args: &SearchArgs) -> Result<()> {
    let query = build_query(args)?;
    if query.is_empty() {
        daybook_core::bail_usage!("give a search text or at least one filter");
    }

    let loaded = journal.load_range(date_range(args.from, args.to)?)?;
    let files: Vec<&JournalFile> = loaded.iter().map(|l| &l.file).collect();

    let report = match args.regex.as_deref() {
        Some(pattern) if is_regex_only(args) => SearchReport {
            hits: regex_search(pattern, files.iter().copied())?,
            errors: Vec::new(),
        },
        _ => query.run(files.iter().copied()),
    };
    for error in &report.errors {
        debug!(%error, "search predicate ignored");
    }

    output_by_format!(cli.format,
        json => {
            let hits: Vec<NumberedHit> = report
                .hits
                .iter()
                .map(|hit| NumberedHit { number: hit.index + 1, hit })
                .collect();
            let errors: Vec<serde_json::Value> = report.errors.iter().map(|e| e.to_json()).collect();
            print_json(&serde_json::json!({ "hits": hits, "errors": errors }))
        },
        human => { print_human(cli, &report, &files); }
    )
}

fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let mut query = SearchQuery::new()
        .with_tags(args.tag.iter().cloned())
        .with_date_range(date_range(args.from, args.to)?);
    if let Some(text) = args.query.as_deref().filter(|t| !t.is_empty()) {
        query = query.with_text(text);
    }
    if let Some(length) = length_filter(args)? {
        query = query.with_length(length);
    }
    if let Some(pattern) = &args.regex {
        query = query.with_regex(pattern.clone());
    }
    Ok(query)
}

fn length_filter(args: &SearchArgs) -> Result<Option<LengthBucket>> {
    if args.length.is_some() {
        return Ok(args.length);
    }
    match (args.min_words, args.max_words) {
        (None, None) => Ok(None),
        (min, max) => {
            let min = min.unwrap_or(0);
            let max = max.unwrap_or(usize::MAX);
            if min > max {
                daybook_core::bail_usage!(format!(
                    "--min-words {} is above --max-words {}",
                    min, max
                ));
            }
            Ok(Some(LengthBucket::Custom { min, max }))
        }
    }
}

fn is_regex_only(args: &SearchArgs) -> bool {
    args.query.as_deref().is_none_or(str::is_empty)
        && args.tag.is_empty()
        && args.from.is_none()
        && args.to.is_none()
        && args.length.is_none()
        && args.min_words.is_none()
        && args.max_words.is_none()
}

fn print_human(cli: &Cli, report: &SearchReport, files: &[&JournalFile]) {
    for error in &report.errors {
        eprintln!("warning: {} (filter ignored)", error);
    }
    if report.hits.is_empty() {
        if !cli.quiet {
            println!("No matching entries");
        }
        return;
    }

    for hit in &report.hits {
        let mut line = format!(
            "{} #{}  {}  {}",
            hit.date,
            hit.index + 1,
            hit.timestamp.format("%H:%M"),
            hit.title
        );
        if !hit.tags.is_empty() {
            line.push_str(&format!("  [{}]", hit.tags.join(", ")));
        }
        println!("{}  ({} words)", line, hit.word_count);

        let content = files
            .iter()
            .find(|f| f.date == hit.date)
            .and_then(|f| f.entry(hit.index))
            .map(|e| e.content.as_str());
        if let Some(snippet) = content.and_then(|c| first_content_snippet(c, &hit.matches)) {
            println!("    {}", snippet);
        }
    }

    if !cli.quiet {
        println!();
        println!("{} matching entries", report.hits.len());
    }
}

/// The body line holding the first content match, trimmed to fit
fn first_content_snippet(content: &str, matches: &[FieldMatch]) -> Option<String> {
    let m = matches.iter().find(|m| m.field == MatchField::Content)?;
    let line_start = content[..m.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[m.end..]
        .find('\n')
        .map_or(content.len(), |i| m.end + i);
    let line = content[line_start..line_end].trim();
    Some(truncate_chars(line, SNIPPET_WIDTH))
}
