//! Individual search predicates

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{JournalError, Result};

/// Upper bound (exclusive) of the short bucket, in words
pub const SHORT_MAX_EXCLUSIVE: usize = 100;
/// Upper bound (inclusive) of the medium bucket, in words
pub const MEDIUM_MAX_INCLUSIVE: usize = 500;

/// Fixed length class of an entry body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    Medium,
    Long,
}

impl LengthClass {
    /// Classify a word count
    pub fn of(words: usize) -> Self {
        if words < SHORT_MAX_EXCLUSIVE {
            LengthClass::Short
        } else if words <= MEDIUM_MAX_INCLUSIVE {
            LengthClass::Medium
        } else {
            LengthClass::Long
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthClass::Short => write!(f, "short"),
            LengthClass::Medium => write!(f, "medium"),
            LengthClass::Long => write!(f, "long"),
        }
    }
}

/// Length filter: a fixed class or a custom inclusive word range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBucket {
    Class(LengthClass),
    Custom { min: usize, max: usize },
}

impl LengthBucket {
    pub fn contains(&self, words: usize) -> bool {
        match self {
            LengthBucket::Class(class) => LengthClass::of(words) == *class,
            LengthBucket::Custom { min, max } => (*min..=*max).contains(&words),
        }
    }
}

impl FromStr for LengthBucket {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "short" => Ok(LengthBucket::Class(LengthClass::Short)),
            "medium" => Ok(LengthBucket::Class(LengthClass::Medium)),
            "long" => Ok(LengthBucket::Class(LengthClass::Long)),
            other => Err(JournalError::invalid_value(
                "length (expected short, medium or long)",
                other,
            )),
        }
    }
}

/// Inclusive date bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Compile a user pattern, case-sensitive
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| JournalError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Case-insensitive literal matcher reporting byte offsets
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
    regex: Regex,
}

impl TextMatcher {
    pub fn new(needle: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
            .map_err(|e| JournalError::InvalidPattern {
                pattern: needle.to_string(),
                reason: e.to_string(),
            })?;
        Ok(TextMatcher {
            needle: needle.to_string(),
            regex,
        })
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Byte ranges of every non-overlapping match in `haystack`
    pub fn find_all(&self, haystack: &str) -> Vec<(usize, usize)> {
        self.regex
            .find_iter(haystack)
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}
