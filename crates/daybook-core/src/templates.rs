//! Built-in entry templates

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entry::Entry;

/// A pre-filled starting point for a new entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Lookup key, e.g. `meeting_notes`
    pub key: &'static str,
    pub title: &'static str,
    pub tags: &'static [&'static str],
    pub content: &'static str,
}

impl Template {
    /// A new entry at `timestamp` filled from this template
    pub fn to_entry(&self, timestamp: NaiveDateTime) -> Entry {
        Entry::new(timestamp, self.title)
            .with_tags(self.tags.iter().copied())
            .with_content(self.content)
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        key: "daily_reflection",
        title: "Daily Reflection",
        tags: &["reflection", "personal"],
        content: "What went well today?\n\
                  \n\
                  \n\
                  What could have gone better?\n\
                  \n\
                  \n\
                  What am I grateful for?\n\
                  \n\
                  \n\
                  Goals for tomorrow:\n\
                  - \n\
                  - \n\
                  - ",
    },
    Template {
        key: "meeting_notes",
        title: "Meeting Notes",
        tags: &["work", "meeting"],
        content: "Meeting: \n\
                  Date: \n\
                  Attendees: \n\
                  \n\
                  Agenda:\n\
                  - \n\
                  - \n\
                  \n\
                  Key Points:\n\
                  - \n\
                  - \n\
                  \n\
                  Action Items:\n\
                  - [ ] \n\
                  - [ ] \n\
                  \n\
                  Next Steps:\n\
                  - ",
    },
    Template {
        key: "idea_capture",
        title: "Idea",
        tags: &["ideas", "brainstorm"],
        content: "Idea: \n\
                  \n\
                  Context:\n\
                  \n\
                  \n\
                  Details:\n\
                  \n\
                  \n\
                  Potential next steps:\n\
                  - \n\
                  - \n\
                  \n\
                  Related thoughts:\n\
                  - ",
    },
    Template {
        key: "goal_setting",
        title: "Goal Setting",
        tags: &["goals", "planning"],
        content: "Goal: \n\
                  \n\
                  Why is this important?\n\
                  \n\
                  \n\
                  Success metrics:\n\
                  - \n\
                  - \n\
                  \n\
                  Timeline:\n\
                  - Start: \n\
                  - Milestone 1: \n\
                  - End: \n\
                  \n\
                  Resources needed:\n\
                  - \n\
                  - \n\
                  \n\
                  Potential obstacles:\n\
                  - \n\
                  - ",
    },
    Template {
        key: "learning_log",
        title: "Learning Log",
        tags: &["learning", "education"],
        content: "What I learned: \n\
                  \n\
                  Source: \n\
                  \n\
                  Key takeaways:\n\
                  - \n\
                  - \n\
                  \n\
                  How I can apply this:\n\
                  \n\
                  \n\
                  Questions for further exploration:\n\
                  - \n\
                  - ",
    },
    Template {
        key: "gratitude",
        title: "Gratitude Entry",
        tags: &["gratitude", "mindfulness"],
        content: "Three things I'm grateful for today:\n\
                  \n\
                  1. \n\
                  \n\
                  2. \n\
                  \n\
                  3. \n\
                  \n\
                  Why these matter to me:\n\
                  \n\
                  \n\
                  How I can express gratitude:\n\
                  - ",
    },
];

/// Find a template by key (case-insensitive)
pub fn find(key: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.key.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{parse, serialize, TIMESTAMP_FORMAT};

    #[test]
    fn test_find_template() {
        assert_eq!(find("meeting_notes").unwrap().title, "Meeting Notes");
        assert_eq!(find("GRATITUDE").unwrap().key, "gratitude");
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = TEMPLATES.iter().map(|t| t.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TEMPLATES.len());
    }

    #[test]
    fn test_continuation_keeps_blank_lines() {
        let reflection = find("daily_reflection").unwrap();
        assert!(reflection
            .content
            .starts_with("What went well today?\n\n\nWhat could"));
        assert!(reflection.content.ends_with("- \n- \n- "));
    }

    #[test]
    fn test_template_entries_round_trip() {
        let ts = NaiveDateTime::parse_from_str("2024-03-01 08:00:00", TIMESTAMP_FORMAT).unwrap();
        for template in TEMPLATES {
            let entry = template.to_entry(ts);
            assert_eq!(entry.tags.len(), 2);
            let parsed = parse(&serialize(&entry));
            assert_eq!(parsed.entries[0].entry, entry, "{}", template.key);
        }
    }
}
