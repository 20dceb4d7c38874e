//! Tag line handling and inline tag detection

use crate::config::TagConfig;

/// Characters allowed in a tag body
pub fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parse the value of a `tags:` line into an ordered, deduplicated list
pub fn parse_tag_line(value: &str) -> Vec<String> {
    let tags: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();
    merge_tags(&[], &tags)
}

/// Format tags as the value of a `tags:` line
pub fn format_tag_line(tags: &[String]) -> String {
    tags.join(", ")
}

/// Manual tags first, then detected ones that are not already present.
///
/// Comparison is case-sensitive; the first spelling wins.
pub fn merge_tags(manual: &[String], detected: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(manual.len() + detected.len());
    for tag in manual.iter().chain(detected) {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}

/// Finds prefix-marked tags such as `#work` or `@alice` in free text
#[derive(Debug, Clone)]
pub struct TagExtractor {
    /// Longest first, so a longer prefix wins at the same position
    prefixes: Vec<String>,
}

impl TagExtractor {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        prefixes.dedup();
        TagExtractor { prefixes }
    }

    pub fn from_config(config: &TagConfig) -> Self {
        Self::new(config.prefixes.iter().cloned())
    }

    /// Tag bodies in order of first occurrence.
    ///
    /// A prefix only counts at the start of the text or after a non-tag
    /// character, and only when at least one tag character follows it.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut previous: Option<char> = None;
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let at_boundary = previous.is_none_or(|c| !is_tag_char(c));

            if at_boundary {
                if let Some(prefix) = self.matching_prefix(rest) {
                    let body_start = pos + prefix.len();
                    let body_len = text[body_start..]
                        .find(|c: char| !is_tag_char(c))
                        .unwrap_or(text.len() - body_start);
                    let body = &text[body_start..body_start + body_len];
                    if !found.iter().any(|t| t == body) {
                        found.push(body.to_string());
                    }
                    previous = body.chars().last();
                    pos = body_start + body_len;
                    continue;
                }
            }

            let Some(c) = rest.chars().next() else {
                break;
            };
            previous = Some(c);
            pos += c.len_utf8();
        }

        found
    }

    fn matching_prefix(&self, rest: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| {
                rest.starts_with(prefix.as_str())
                    && rest[prefix.len()..].chars().next().is_some_and(is_tag_char)
            })
            .map(String::as_str)
    }
}

/// Detect tags in `text` using `prefixes`
pub fn extract_tags(text: &str, prefixes: &[String]) -> Vec<String> {
    TagExtractor::new(prefixes.iter().cloned()).extract(text)
}
