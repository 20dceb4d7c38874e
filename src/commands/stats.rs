//! `daybook stats` - totals, tag usage and length distribution

use crate::cli::Cli;
use crate::commands::format::{output_by_format, print_json};
use daybook_core::error::Result;
use daybook_core::stats::JournalStats;
use daybook_core::store::Journal;

pub fn execute(cli: &Cli, journal: &Journal) -> Result<()> {
    let stats = journal.stats()?;

    output_by_format!(cli.format,
        json => print_json(&stats),
        human => { print_human(&stats); }
    )
}

fn print_human(stats: &JournalStats) {
    println!("Days:          {}", stats.total_files);
    println!("Entries:       {}", stats.total_entries);
    println!("Words:         {}", stats.total_words);
    println!("Average words: {:.1}", stats.average_words);
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        println!("Range:         {} .. {}", first, last);
    }

    let dist = &stats.length_distribution;
    println!();
    println!("Length");
    println!("  short:  {}", dist.short);
    println!("  medium: {}", dist.medium);
    println!("  long:   {}", dist.long);

    if !stats.most_used_tags.is_empty() {
        println!();
        println!("Top tags");
        for tag in &stats.most_used_tags {
            println!("  {:>4}  {}", tag.count, tag.tag);
        }
    }
}
