use crate::cli::support::{add, daybook, journal, json_of};
use predicates::prelude::*;

fn seeded() -> tempfile::TempDir {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "Standup", "Shipped the parser #work");
    add(dir.path(), "2024-03-02 20:00", "Evening walk", "Quiet park, no phone #life");
    add(dir.path(), "2024-03-03 09:00", "Planning", "Roadmap review #work #planning");
    dir
}

#[test]
fn test_text_search_is_case_insensitive() {
    let dir = seeded();
    daybook(dir.path())
        .args(["search", "PARSER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01 #1"))
        .stdout(predicate::str::contains("Shipped the parser"))
        .stdout(predicate::str::contains("1 matching entries"));
}

#[test]
fn test_tag_and_date_filters_intersect() {
    let dir = seeded();
    let value = json_of(daybook(dir.path()).args([
        "--format",
        "json",
        "search",
        "--tag",
        "WORK",
        "--from",
        "2024-03-02",
    ]));
    let hits = value["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Planning");
    assert_eq!(hits[0]["number"], 1);
    assert_eq!(value["errors"], serde_json::json!([]));
}

#[test]
fn test_regex_search_over_bodies() {
    let dir = seeded();
    let value = json_of(daybook(dir.path()).args(["--format", "json", "search", "--regex", r"\bp\w+k\b"]));
    let hits = value["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Evening walk");
}

#[test]
fn test_invalid_regex_alone_is_usage_error() {
    let dir = seeded();
    daybook(dir.path())
        .args(["search", "--regex", "(unclosed"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("(unclosed"));
}

#[test]
fn test_invalid_regex_with_other_filters_is_dropped() {
    let dir = seeded();
    let value = json_of(daybook(dir.path()).args([
        "--format", "json", "search", "--tag", "life", "--regex", "[",
    ]));
    assert_eq!(value["hits"].as_array().unwrap().len(), 1);
    assert_eq!(value["errors"][0]["error"]["type"], "invalid_pattern");
}

#[test]
fn test_length_filter() {
    let dir = seeded();
    let value = json_of(daybook(dir.path()).args([
        "--format", "json", "search", "--min-words", "5", "--max-words", "5",
    ]));
    let titles: Vec<&str> = value["hits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Evening walk"]);
}

#[test]
fn test_search_without_filters_is_usage_error() {
    let dir = seeded();
    daybook(dir.path()).arg("search").assert().code(2);
}

#[test]
fn test_no_matches() {
    let dir = seeded();
    daybook(dir.path())
        .args(["search", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching entries"));
}
