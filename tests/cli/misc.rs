use std::fs;

use crate::cli::support::{add, daybook, journal, json_of};
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let dir = journal();
    daybook(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: daybook"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn test_unknown_format_exit_code_2() {
    let dir = journal();
    daybook(dir.path())
        .args(["--format", "yaml", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_json_error_envelope() {
    let dir = journal();
    let output = daybook(dir.path())
        .args(["--format", "json", "show", "2024-03-01", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["type"], "entry_not_found");
    assert_eq!(value["error"]["code"], 3);
}

#[test]
fn test_tags_by_count() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "A", "#work #ideas");
    add(dir.path(), "2024-03-02 09:00", "B", "#work");

    let value = json_of(daybook(dir.path()).args(["--format", "json", "tags"]));
    assert_eq!(value[0]["tag"], "work");
    assert_eq!(value[0]["count"], 2);
    assert_eq!(value[1]["tag"], "ideas");
}

#[test]
fn test_stats() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "A", "one two three");
    add(dir.path(), "2024-03-03 09:00", "B", "four");

    let value = json_of(daybook(dir.path()).args(["--format", "json", "stats"]));
    assert_eq!(value["total_files"], 2);
    assert_eq!(value["total_entries"], 2);
    assert_eq!(value["total_words"], 4);
    assert_eq!(value["first_date"], "2024-03-01");
    assert_eq!(value["last_date"], "2024-03-03");
    assert_eq!(value["length_distribution"]["short"], 2);

    daybook(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:       2"));
}

#[test]
fn test_backup_snapshot() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "A", "x");

    let value = json_of(daybook(dir.path()).args(["--format", "json", "backup"]));
    assert_eq!(value["files"], 1);
    let snapshot = std::path::PathBuf::from(value["path"].as_str().unwrap());
    assert!(snapshot.join("2024-03-01.md").is_file());
}

#[test]
fn test_templates() {
    let dir = journal();
    daybook(dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("gratitude"))
        .stdout(predicate::str::contains("meeting_notes"));
}

#[test]
fn test_config_disables_tag_detection() {
    let dir = journal();
    let config = dir.path().join("config.toml");
    let text = fs::read_to_string(&config)
        .unwrap()
        .replace("auto_detect = true", "auto_detect = false");
    fs::write(&config, text).unwrap();

    add(dir.path(), "2024-03-01 09:00", "A", "#ignored");
    let shown = json_of(daybook(dir.path()).args(["--format", "json", "show", "2024-03-01", "1"]));
    assert_eq!(shown["tags"], serde_json::json!([]));
}
