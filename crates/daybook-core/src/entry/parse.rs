//! Recover entries and their byte spans from raw file text

use chrono::NaiveDateTime;
use serde::Serialize;

use super::tags::parse_tag_line;
use super::{Entry, Span, SpannedEntry, TIMESTAMP_FORMAT};

/// Marker every header line starts with
pub const HEADER_PREFIX: &str = "# [";

/// Prefix of the optional tag line below a header
pub const TAG_LINE_PREFIX: &str = "tags:";

/// What went wrong on an anomalous line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Looked like a header but the timestamp did not parse
    MalformedHeader,
    /// Non-blank text before the first header
    OrphanText,
}

/// A recoverable problem found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseAnomaly {
    /// One-based line number
    pub line: usize,
    pub kind: AnomalyKind,
    /// The offending line, without its terminator
    pub text: String,
}

/// Parser output: entries in file order plus anomalies
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub entries: Vec<SpannedEntry>,
    pub anomalies: Vec<ParseAnomaly>,
    /// Bytes before the first header (not covered by any span)
    pub preamble: String,
}

#[derive(Debug)]
struct Line<'a> {
    start: usize,
    text: &'a str,
}

impl Line<'_> {
    fn trimmed(&self) -> &str {
        self.text.trim_end_matches(['\n', '\r'])
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Header fields recovered from a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub timestamp: NaiveDateTime,
    pub title: String,
}

/// Classify a line as a header.
///
/// Returns `None` for ordinary lines, `Some(Err(()))` for lines carrying the
/// header marker whose timestamp does not parse.
#[allow(clippy::result_unit_err)]
pub fn parse_header(line: &str) -> Option<Result<Header, ()>> {
    let rest = line.trim_end_matches(['\n', '\r']).strip_prefix(HEADER_PREFIX)?;
    let Some((stamp, title)) = rest.split_once(']') else {
        return Some(Err(()));
    };
    match NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT) {
        Ok(timestamp) if title.is_empty() || title.starts_with(char::is_whitespace) => {
            Some(Ok(Header {
                timestamp,
                title: title.trim().to_string(),
            }))
        }
        _ => Some(Err(())),
    }
}

/// Parse raw daily file text.
///
/// Every well-formed header starts a new entry whose span runs to the next
/// header, or to the end of the text for the last one. Never fails: problems
/// are reported as anomalies and the affected lines are left in place.
pub fn parse(raw: &str) -> ParseOutcome {
    let mut lines = Vec::new();
    let mut offset = 0;
    for text in raw.split_inclusive('\n') {
        lines.push(Line {
            start: offset,
            text,
        });
        offset += text.len();
    }

    let mut outcome = ParseOutcome::default();
    let mut headers: Vec<(usize, Header)> = Vec::new();

    for (number, line) in lines.iter().enumerate() {
        match parse_header(line.text) {
            Some(Ok(header)) => headers.push((number, header)),
            Some(Err(())) => outcome.anomalies.push(ParseAnomaly {
                line: number + 1,
                kind: AnomalyKind::MalformedHeader,
                text: line.trimmed().to_string(),
            }),
            None => {
                if headers.is_empty() && !line.is_blank() {
                    outcome.anomalies.push(ParseAnomaly {
                        line: number + 1,
                        kind: AnomalyKind::OrphanText,
                        text: line.trimmed().to_string(),
                    });
                }
            }
        }
    }

    let preamble_end = headers
        .first()
        .map_or(raw.len(), |(first, _)| lines[*first].start);
    outcome.preamble = raw[..preamble_end].to_string();

    for (position, (line_index, header)) in headers.iter().enumerate() {
        let body_end_line = headers
            .get(position + 1)
            .map_or(lines.len(), |(next, _)| *next);
        let span_end = lines.get(body_end_line).map_or(raw.len(), |l| l.start);
        let body = &lines[line_index + 1..body_end_line];
        let (tags, content) = split_body(body);

        outcome.entries.push(SpannedEntry {
            entry: Entry {
                timestamp: header.timestamp,
                title: header.title.clone(),
                tags,
                content,
            },
            span: Span {
                start: lines[*line_index].start,
                end: span_end,
            },
        });
    }

    outcome.anomalies.sort_by_key(|a| a.line);
    outcome
}

/// Separate the optional tag line from the content of one block
fn split_body(mut body: &[Line<'_>]) -> (Vec<String>, String) {
    if body.first().is_some_and(Line::is_blank) {
        body = &body[1..];
    }

    let mut tags = Vec::new();
    if let Some(rest) = body
        .first()
        .and_then(|line| line.trimmed().strip_prefix(TAG_LINE_PREFIX))
    {
        tags = parse_tag_line(rest);
        body = &body[1..];
        if body.first().is_some_and(Line::is_blank) {
            body = &body[1..];
        }
    }

    if body.last().is_some_and(Line::is_blank) {
        body = &body[..body.len() - 1];
    }

    let mut content: String = body.iter().map(|line| line.text).collect();
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    (tags, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_text() {
        let outcome = parse("");
        assert!(outcome.entries.is_empty());
        assert!(outcome.anomalies.is_empty());
        assert!(outcome.preamble.is_empty());
    }

    #[test]
    fn test_parse_single_entry_with_tags() {
        let raw = "# [2024-03-01 08:15:00] Morning pages\n\ntags: work, planning\n\nWrote the plan.\nSecond line.\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.entries.len(), 1);
        let entry = &outcome.entries[0].entry;
        assert_eq!(entry.title, "Morning pages");
        assert_eq!(entry.tags, vec!["work", "planning"]);
        assert_eq!(entry.content, "Wrote the plan.\nSecond line.");
        assert_eq!(outcome.entries[0].span, Span { start: 0, end: raw.len() });
    }

    #[test]
    fn test_parse_header_without_tag_line() {
        let outcome = parse("# [2024-03-01 08:15:00] Quick\n\nJust text\n\n");
        assert!(outcome.entries[0].entry.tags.is_empty());
        assert_eq!(outcome.entries[0].entry.content, "Just text");
    }

    #[test]
    fn test_parse_empty_title_and_body() {
        let outcome = parse("# [2024-03-01 08:15:00]\n\n");
        let entry = &outcome.entries[0].entry;
        assert_eq!(entry.title, "");
        assert_eq!(entry.content, "");
    }

    #[test]
    fn test_spans_are_contiguous() {
        let raw = "# [2024-03-01 08:00:00] A\n\none\n\n# [2024-03-01 08:00:00] A\n\ntwo\n\n# [2024-03-01 09:00:00] C\n\nthree";
        let outcome = parse(raw);
        assert_eq!(outcome.entries.len(), 3);
        assert_eq!(outcome.entries[0].span.start, 0);
        assert_eq!(outcome.entries[0].span.end, outcome.entries[1].span.start);
        assert_eq!(outcome.entries[1].span.end, outcome.entries[2].span.start);
        assert_eq!(outcome.entries[2].span.end, raw.len());
        assert_eq!(outcome.entries[2].entry.content, "three");
    }

    #[test]
    fn test_malformed_header_stays_in_previous_content() {
        let raw = "# [2024-03-01 08:00:00] Good\n\nbody\n# [not a time] Bad\nmore\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(
            outcome.entries[0].entry.content,
            "body\n# [not a time] Bad\nmore"
        );
        assert_eq!(outcome.anomalies.len(), 1);
        assert_eq!(outcome.anomalies[0].kind, AnomalyKind::MalformedHeader);
        assert_eq!(outcome.anomalies[0].line, 4);
    }

    #[test]
    fn test_malformed_header_before_any_entry_is_dropped() {
        let raw = "# [2024-13-45 99:00:00] Broken\n\n# [2024-03-01 08:00:00] Good\n\nbody\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].entry.title, "Good");
        assert_eq!(outcome.entries[0].span.start, raw.find("# [2024-03-01").unwrap());
        assert_eq!(outcome.anomalies[0].kind, AnomalyKind::MalformedHeader);
    }

    #[test]
    fn test_orphan_text_before_first_header() {
        let raw = "stray notes\n\n# [2024-03-01 08:00:00] Good\n\nbody\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.preamble, "stray notes\n\n");
        assert_eq!(outcome.anomalies.len(), 1);
        assert_eq!(outcome.anomalies[0].kind, AnomalyKind::OrphanText);
        assert_eq!(outcome.anomalies[0].text, "stray notes");
    }

    #[test]
    fn test_heading_inside_content_is_not_a_header() {
        let raw = "# [2024-03-01 08:00:00] Notes\n\n# A markdown heading\n## Another\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].entry.content, "# A markdown heading\n## Another");
        assert!(outcome.anomalies.is_empty());
    }

    #[test]
    fn test_parse_header_variants() {
        assert!(parse_header("plain text").is_none());
        assert!(matches!(parse_header("# [2024-03-01 08:00:00]"), Some(Ok(_))));
        assert!(matches!(parse_header("# [2024-03-01 08:00:00]x"), Some(Err(()))));
        assert!(matches!(parse_header("# [2024-03-01 08:00] x"), Some(Err(()))));
        assert!(matches!(parse_header("# [2024-03-01 08:00:00"), Some(Err(()))));
        let header = parse_header("# [2024-03-01 08:00:00]   Spaced  \r\n")
            .unwrap()
            .unwrap();
        assert_eq!(header.title, "Spaced");
    }

    #[test]
    fn test_crlf_lines() {
        let raw = "# [2024-03-01 08:00:00] Win\r\n\r\ntags: a\r\n\r\nbody\r\n\r\n";
        let outcome = parse(raw);
        let entry = &outcome.entries[0].entry;
        assert_eq!(entry.title, "Win");
        assert_eq!(entry.tags, vec!["a"]);
        assert_eq!(entry.content, "body");
    }

    #[test]
    fn test_content_keeps_inner_blank_lines() {
        let raw = "# [2024-03-01 08:00:00] T\n\npara one\n\n\npara two\n\n";
        let outcome = parse(raw);
        assert_eq!(outcome.entries[0].entry.content, "para one\n\n\npara two");
    }
}
