use std::fs;

use crate::cli::support::{add, daybook, journal, json_of};
use predicates::prelude::*;

#[test]
fn test_markdown_export_to_stdout() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "one");
    add(dir.path(), "2024-03-02 09:00", "Second", "two");

    daybook(dir.path())
        .args(["export", "--output", "-", "--from", "2024-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 2024-03-02"))
        .stdout(predicate::str::contains("# [2024-03-02 09:00:00] Second"))
        .stdout(predicate::str::contains("First").not());
}

#[test]
fn test_export_defaults_to_exports_dir() {
    let dir = journal();
    add(dir.path(), "2024-03-01 09:00", "First", "one");

    let value = json_of(daybook(dir.path()).args(["--format", "json", "export", "--as", "json"]));
    let path = value["path"].as_str().unwrap();
    assert!(path.contains("exports"));
    assert!(path.ends_with(".json"));
    assert_eq!(value["entries"], 1);

    let exported: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(exported[0]["title"], "First");
    assert_eq!(exported[0]["date"], "2024-03-01");
}

#[test]
fn test_json_round_trip_through_import_skips_duplicates() {
    let source = journal();
    add(source.path(), "2024-03-01 09:00", "First", "one #tagged");
    add(source.path(), "2024-03-02 09:00", "Second", "two");
    let export_path = source.path().join("all.json");
    daybook(source.path())
        .args(["export", "--as", "json", "--output"])
        .arg(&export_path)
        .assert()
        .success();

    let target = journal();
    let first = json_of(daybook(target.path()).args(["--format", "json", "import"]).arg(&export_path));
    assert_eq!(first["imported"], 2);
    assert_eq!(first["skipped_duplicates"], 0);

    let again = json_of(daybook(target.path()).args(["--format", "json", "import"]).arg(&export_path));
    assert_eq!(again["imported"], 0);
    assert_eq!(again["skipped_duplicates"], 2);

    let shown = json_of(daybook(target.path()).args(["--format", "json", "show", "2024-03-01", "1"]));
    assert_eq!(shown["tags"], serde_json::json!(["tagged"]));
}

#[test]
fn test_markdown_import() {
    let dir = journal();
    let file = dir.path().join("old.md");
    fs::write(
        &file,
        "## 2023-12-31\n\n# [2023-12-31 23:00:00] Year end\n\nlooking back\n\n",
    )
    .unwrap();

    daybook(dir.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 entries (0 duplicates skipped)"));

    daybook(dir.path())
        .args(["show", "2023-12-31", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("looking back"));
}

#[test]
fn test_import_unknown_extension_needs_format() {
    let dir = journal();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "# [2024-01-01 08:00:00] A\n").unwrap();

    daybook(dir.path()).arg("import").arg(&file).assert().code(2);
    daybook(dir.path())
        .args(["import", "--as", "markdown"])
        .arg(&file)
        .assert()
        .success();
}
