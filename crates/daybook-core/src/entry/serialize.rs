//! Canonical text form of entries

use super::parse::{parse, TAG_LINE_PREFIX};
use super::tags::format_tag_line;
use super::{Entry, TIMESTAMP_FORMAT};

/// Render the header line, without terminator
pub fn header_line(entry: &Entry) -> String {
    let stamp = entry.timestamp.format(TIMESTAMP_FORMAT);
    if entry.title.is_empty() {
        format!("# [{}]", stamp)
    } else {
        format!("# [{}] {}", stamp, entry.title)
    }
}

/// Render one entry block in canonical form.
///
/// The block always ends with a blank line so blocks can be concatenated.
pub fn serialize(entry: &Entry) -> String {
    let mut out = header_line(entry);
    out.push_str("\n\n");

    if !entry.tags.is_empty() {
        out.push_str(TAG_LINE_PREFIX);
        out.push(' ');
        out.push_str(&format_tag_line(&entry.tags));
        out.push_str("\n\n");
    }

    if !entry.content.is_empty() {
        out.push_str(&entry.content);
        out.push_str("\n\n");
    }
    out
}

/// Render a sequence of entries as a whole file
pub fn render<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    entries.into_iter().map(serialize).collect()
}

/// Canonical form of raw file text.
///
/// Entries are re-rendered; text before the first header is kept, trimmed,
/// and separated from the entries by one blank line.
pub fn normalize(raw: &str) -> String {
    let outcome = parse(raw);
    let mut out = String::new();
    let preamble = outcome.preamble.trim();
    if !preamble.is_empty() {
        out.push_str(preamble);
        out.push_str("\n\n");
    }
    out.push_str(&render(outcome.entries.iter().map(|e| &e.entry)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn entry(title: &str, tags: &[&str], content: &str) -> Entry {
        let ts = NaiveDateTime::parse_from_str("2024-03-01 08:15:00", TIMESTAMP_FORMAT).unwrap();
        Entry::new(ts, title)
            .with_tags(tags.iter().copied())
            .with_content(content)
    }

    #[test]
    fn test_serialize_full_entry() {
        let text = serialize(&entry("Morning", &["work", "planning"], "Line one\nLine two"));
        assert_eq!(
            text,
            "# [2024-03-01 08:15:00] Morning\n\ntags: work, planning\n\nLine one\nLine two\n\n"
        );
    }

    #[test]
    fn test_serialize_without_tags() {
        let text = serialize(&entry("Quick", &[], "Body"));
        assert_eq!(text, "# [2024-03-01 08:15:00] Quick\n\nBody\n\n");
    }

    #[test]
    fn test_serialize_empty_title_and_content() {
        assert_eq!(serialize(&entry("", &[], "")), "# [2024-03-01 08:15:00]\n\n");
    }

    #[test]
    fn test_round_trip_preserves_edge_content() {
        let cases = [
            entry("T", &[], ""),
            entry("T", &["a"], ""),
            entry("T", &[], "\n"),
            entry("T", &[], "trailing blank\n"),
            entry("T", &[], "\nleading blank"),
            entry("T", &["x", "y"], "\n\nboth\n\n"),
            entry("", &[], "   indented"),
            entry("Unicode ☕", &["café"], "naïve text, with marks"),
        ];
        for original in cases {
            let parsed = parse(&serialize(&original));
            assert_eq!(parsed.entries.len(), 1, "{:?}", original);
            assert_eq!(parsed.entries[0].entry, original);
        }
    }

    #[test]
    fn test_render_concatenates_blocks() {
        let a = entry("A", &[], "one");
        let b = entry("B", &["t"], "two");
        let text = render([&a, &b]);
        let parsed = parse(&text);
        let entries: Vec<_> = parsed.entries.into_iter().map(|e| e.entry).collect();
        assert_eq!(entries, vec![a, b]);
    }

    #[test]
    fn test_normalize_trims_redundant_blank_lines() {
        let raw = "# [2024-03-01 08:00:00]   A  \n\ntags:  x ,y,, \n\nbody\n\n# [2024-03-01 09:00:00] B\nno gap";
        let expected = "# [2024-03-01 08:00:00] A\n\ntags: x, y\n\nbody\n\n# [2024-03-01 09:00:00] B\n\nno gap\n\n";
        assert_eq!(normalize(raw), expected);
        assert_eq!(normalize(expected), expected);
    }

    #[test]
    fn test_normalize_keeps_preamble() {
        let raw = "\n\nloose line\n# [2024-03-01 08:00:00] A\n\nbody\n\n";
        let normalized = normalize(raw);
        assert_eq!(normalized, "loose line\n\n# [2024-03-01 08:00:00] A\n\nbody\n\n");
        assert_eq!(normalize(&normalized), normalized);
    }
}
