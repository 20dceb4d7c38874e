//! Composable search over loaded journal files
//!
//! Predicates are combined by AND. Results keep the order in which files and
//! entries were supplied; nothing is ranked.

pub mod predicate;


use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::entry::{Entry, JournalFile};
use crate::error::{JournalError, Result};

pub use predicate::{
    compile_pattern, DateRange, LengthBucket, LengthClass, TextMatcher, MEDIUM_MAX_INCLUSIVE,
    SHORT_MAX_EXCLUSIVE,
};

/// Which part of an entry a match was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum MatchField {
    Title,
    Content,
    /// Position within the entry's tag list
    Tag { index: usize },
}

/// One highlighted range, as byte offsets into the matched field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    #[serde(flatten)]
    pub field: MatchField,
    pub start: usize,
    pub end: usize,
}

/// An entry that satisfied every active predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub date: NaiveDate,
    /// Zero-based position within the file
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub title: String,
    pub tags: Vec<String>,
    pub word_count: usize,
    pub matches: Vec<FieldMatch>,
}

/// Hits plus the predicates that could not be applied
#[derive(Debug, Default)]
pub struct SearchReport {
    pub hits: Vec<SearchHit>,
    pub errors: Vec<JournalError>,
}

/// A set of predicates, all optional
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    text: Option<String>,
    tags: Vec<String>,
    dates: DateRange,
    length: Option<LengthBucket>,
    pattern: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring over title, content and tags
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Entries carrying any of `tags` (case-insensitive)
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Only files whose date lies within `range`
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.dates = range;
        self
    }

    pub fn with_length(mut self, length: LengthBucket) -> Self {
        self.length = Some(length);
        self
    }

    /// Case-sensitive regex over content only
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Whether no predicate is set
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.tags.is_empty()
            && self.dates.is_unbounded()
            && self.length.is_none()
            && self.pattern.is_none()
    }

    /// Run the query over `files` in the given order.
    ///
    /// Predicates that fail to compile are dropped and reported in
    /// [`SearchReport::errors`]; the rest still filter.
    pub fn run<'a>(&self, files: impl IntoIterator<Item = &'a JournalFile>) -> SearchReport {
        let mut errors = Vec::new();

        let text = self
            .text
            .as_deref()
            .and_then(|t| TextMatcher::new(t).map_err(|e| errors.push(e)).ok());
        let regex = self
            .pattern
            .as_deref()
            .and_then(|p| compile_pattern(p).map_err(|e| errors.push(e)).ok());

        let compiled = CompiledQuery {
            text,
            tags: self.tags.iter().map(|t| t.to_lowercase()).collect(),
            dates: self.dates,
            length: self.length,
            regex,
        };

        let mut hits = Vec::new();
        for file in files {
            if !compiled.dates.contains(file.date) {
                continue;
            }
            for (index, entry) in file.iter().enumerate() {
                if let Some(matches) = compiled.evaluate(entry) {
                    hits.push(SearchHit {
                        date: file.date,
                        index,
                        timestamp: entry.timestamp,
                        title: entry.title.clone(),
                        tags: entry.tags.clone(),
                        word_count: entry.word_count(),
                        matches,
                    });
                }
            }
        }

        debug!(hits = hits.len(), errors = errors.len(), "search complete");
        SearchReport { hits, errors }
    }

    /// Like [`run`](Self::run), but fail on the first predicate error
    pub fn run_strict<'a>(
        &self,
        files: impl IntoIterator<Item = &'a JournalFile>,
    ) -> Result<Vec<SearchHit>> {
        let mut report = self.run(files);
        if report.errors.is_empty() {
            Ok(report.hits)
        } else {
            Err(report.errors.remove(0))
        }
    }
}

/// Regex search over content alone
pub fn regex_search<'a>(
    pattern: &str,
    files: impl IntoIterator<Item = &'a JournalFile>,
) -> Result<Vec<SearchHit>> {
    SearchQuery::new().with_regex(pattern).run_strict(files)
}

struct CompiledQuery {
    text: Option<TextMatcher>,
    tags: Vec<String>,
    dates: DateRange,
    length: Option<LengthBucket>,
    regex: Option<Regex>,
}

impl CompiledQuery {
    /// Highlight ranges if `entry` passes, `None` otherwise
    fn evaluate(&self, entry: &Entry) -> Option<Vec<FieldMatch>> {
        if !self.tags.is_empty()
            && !entry
                .tags
                .iter()
                .any(|tag| self.tags.contains(&tag.to_lowercase()))
        {
            return None;
        }

        if let Some(length) = &self.length {
            if !length.contains(entry.word_count()) {
                return None;
            }
        }

        let mut matches = Vec::new();

        if let Some(matcher) = &self.text {
            let before = matches.len();
            push_matches(&mut matches, MatchField::Title, matcher.find_all(&entry.title));
            push_matches(&mut matches, MatchField::Content, matcher.find_all(&entry.content));
            for (index, tag) in entry.tags.iter().enumerate() {
                push_matches(&mut matches, MatchField::Tag { index }, matcher.find_all(tag));
            }
            if matches.len() == before {
                return None;
            }
        }

        if let Some(regex) = &self.regex {
            let found: Vec<(usize, usize)> = regex
                .find_iter(&entry.content)
                .map(|m| (m.start(), m.end()))
                .collect();
            if found.is_empty() {
                return None;
            }
            push_matches(&mut matches, MatchField::Content, found);
        }

        Some(matches)
    }
}

fn push_matches(out: &mut Vec<FieldMatch>, field: MatchField, ranges: Vec<(usize, usize)>) {
    out.extend(ranges.into_iter().map(|(start, end)| FieldMatch {
        field: field.clone(),
        start,
        end,
    }));
}
