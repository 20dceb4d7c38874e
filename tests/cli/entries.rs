use std::fs;

use crate::cli::support::{add, daily_file, daybook, journal, json_of};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// init / add / list / show
// ============================================================================

#[test]
fn test_init_creates_layout_and_is_idempotent() {
    let dir = journal();
    assert!(dir.path().join("daily").is_dir());
    assert!(dir.path().join("backups").is_dir());
    assert!(dir.path().join("exports").is_dir());
    assert!(dir.path().join("config.toml").is_file());

    daybook(dir.path()).arg("init").assert().success();
}

#[test]
fn test_commands_need_an_initialized_journal() {
    let dir = tempdir().unwrap();
    daybook(dir.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("daybook init"));
}

#[test]
fn test_add_writes_canonical_blocks() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "body one");
    add(dir.path(), "2024-03-01 10:00:00", "Second", "body two");

    let text = fs::read_to_string(daily_file(dir.path(), "2024-03-01")).unwrap();
    assert_eq!(
        text,
        "# [2024-03-01 09:00:00] First\n\nbody one\n\n\
         # [2024-03-01 10:00:00] Second\n\nbody two\n\n"
    );
}

#[test]
fn test_add_reads_piped_body() {
    let dir = journal();
    daybook(dir.path())
        .args(["add", "Piped", "--at", "2024-03-01 09:00"])
        .write_stdin("from stdin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2024-03-01 #1: Piped"));

    let text = fs::read_to_string(daily_file(dir.path(), "2024-03-01")).unwrap();
    assert!(text.contains("\n\nfrom stdin\n\n"));
}

#[test]
fn test_add_merges_detected_tags() {
    let dir = journal();
    let value = json_of(daybook(dir.path()).args([
        "--format",
        "json",
        "add",
        "Rusty",
        "--at",
        "2024-03-01 09:00",
        "--tag",
        "work",
        "--content",
        "learning #rust with @alice",
    ]));
    assert_eq!(value["number"], 1);
    assert_eq!(value["tags"], serde_json::json!(["work", "rust", "alice"]));
}

#[test]
fn test_add_from_template() {
    let dir = journal();
    daybook(dir.path())
        .args(["add", "--template", "gratitude", "--at", "2024-03-01 21:00", "--content", "sun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gratitude Entry"));
}

#[test]
fn test_add_without_title_is_usage_error() {
    let dir = journal();
    daybook(dir.path())
        .args(["add", "--content", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_add_rejects_tag_with_comma() {
    let dir = journal();
    daybook(dir.path())
        .args(["add", "T", "--at", "2024-03-01 09:00", "--tag", "work,home", "--content", "x"])
        .assert()
        .code(2);
    assert!(!daily_file(dir.path(), "2024-03-01").exists());
}

#[test]
fn test_list_groups_by_day() {
    let dir = journal();
    add(dir.path(), "2024-03-02 08:00", "Later day", "b");
    add(dir.path(), "2024-03-01 08:00", "Early day", "a");

    daybook(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01 Friday"))
        .stdout(predicate::str::contains("  1. 08:00:00  Early day"))
        .stdout(predicate::str::contains("2024-03-02 Saturday"));

    daybook(dir.path())
        .args(["list", "--date", "2024-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Later day"))
        .stdout(predicate::str::contains("Early day").not());
}

#[test]
fn test_show_json_is_one_based() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "body one");
    add(dir.path(), "2024-03-01 10:00", "Second", "body two");

    let value = json_of(daybook(dir.path()).args(["--format", "json", "show", "2024-03-01", "2"]));
    assert_eq!(value["title"], "Second");
    assert_eq!(value["content"], "body two");
    assert_eq!(value["number"], 2);
    assert_eq!(value["word_count"], 2);
}

#[test]
fn test_show_missing_entry_exit_code_3() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "Only", "x");

    daybook(dir.path())
        .args(["show", "2024-03-01", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("entry 3 not found in 2024-03-01 (1 entries)"));
}

#[test]
fn test_entry_number_zero_is_rejected() {
    let dir = journal();
    daybook(dir.path())
        .args(["show", "2024-03-01", "0"])
        .assert()
        .code(2);
}

// ============================================================================
// edit / delete
// ============================================================================

#[test]
fn test_edit_content_leaves_neighbours_untouched() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "body one");
    add(dir.path(), "2024-03-01 10:00", "Second", "body two");
    add(dir.path(), "2024-03-01 11:00", "Third", "body three");

    daybook(dir.path())
        .args(["edit", "2024-03-01", "2", "--content", "rewritten"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry updated"));

    let text = fs::read_to_string(daily_file(dir.path(), "2024-03-01")).unwrap();
    assert_eq!(
        text,
        "# [2024-03-01 09:00:00] First\n\nbody one\n\n\
         # [2024-03-01 10:00:00] Second\n\nrewritten\n\n\
         # [2024-03-01 11:00:00] Third\n\nbody three\n\n"
    );
}

#[test]
fn test_edit_without_changes_reports_unchanged() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "same");

    daybook(dir.path())
        .args(["edit", "2024-03-01", "1", "--content", "same"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_edit_with_external_editor_command() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "keep me");

    // `true` leaves the temp file as written
    daybook(dir.path())
        .args(["edit", "2024-03-01", "1", "--editor", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_delete_shifts_later_entries() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "a");
    add(dir.path(), "2024-03-01 10:00", "Second", "b");

    daybook(dir.path())
        .args(["delete", "2024-03-01", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2024-03-01 #1: First"));

    let value = json_of(daybook(dir.path()).args(["--format", "json", "show", "2024-03-01", "1"]));
    assert_eq!(value["title"], "Second");
}

#[test]
fn test_delete_last_entry_removes_file() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "Only", "a");

    daybook(dir.path())
        .args(["delete", "2024-03-01", "1"])
        .assert()
        .success();
    assert!(!daily_file(dir.path(), "2024-03-01").exists());
}
