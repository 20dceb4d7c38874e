//! Journal-wide statistics

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::{Entry, JournalFile};
use crate::search::LengthClass;

/// Number of tags reported in [`JournalStats::most_used_tags`]
pub const TOP_TAGS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Count tag uses across `entries`, count descending then name ascending
pub fn count_tags<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        for tag in &entry.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags
}

/// Entries per length class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LengthDistribution {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl LengthDistribution {
    fn add(&mut self, class: LengthClass) {
        match class {
            LengthClass::Short => self.short += 1,
            LengthClass::Medium => self.medium += 1,
            LengthClass::Long => self.long += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalStats {
    pub total_files: usize,
    pub total_entries: usize,
    pub total_words: usize,
    pub average_words: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Most frequent tags, count descending then name ascending
    pub most_used_tags: Vec<TagCount>,
    pub length_distribution: LengthDistribution,
}

impl JournalStats {
    pub fn compute<'a>(files: impl IntoIterator<Item = &'a JournalFile>) -> Self {
        let mut stats = JournalStats::default();
        let mut tagged: Vec<&Entry> = Vec::new();

        for file in files {
            if file.is_empty() {
                continue;
            }
            stats.total_files += 1;
            stats.first_date = Some(stats.first_date.map_or(file.date, |d| d.min(file.date)));
            stats.last_date = Some(stats.last_date.map_or(file.date, |d| d.max(file.date)));

            for entry in file.iter() {
                let words = entry.word_count();
                stats.total_entries += 1;
                stats.total_words += words;
                stats.length_distribution.add(LengthClass::of(words));
                tagged.push(entry);
            }
        }

        if stats.total_entries > 0 {
            stats.average_words = stats.total_words as f64 / stats.total_entries as f64;
        }

        let mut tags = count_tags(tagged);
        tags.truncate(TOP_TAGS);
        stats.most_used_tags = tags;

        stats
    }
}
