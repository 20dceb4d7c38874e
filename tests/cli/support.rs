use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::{tempdir, TempDir};

/// A daybook command against `root`, isolated from the caller's environment
pub fn daybook(root: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("daybook");
    cmd.arg("--root")
        .arg(root)
        .env_remove("DAYBOOK_DIR")
        .env_remove("DAYBOOK_LOG")
        .env_remove("RUST_LOG")
        .env_remove("EDITOR")
        .env_remove("VISUAL")
        .write_stdin("");
    cmd
}

/// A fresh, initialized journal
pub fn journal() -> TempDir {
    let dir = tempdir().unwrap();
    daybook(dir.path()).arg("init").assert().success();
    dir
}

/// Add an entry at a fixed timestamp with `--content`
pub fn add(root: &Path, at: &str, title: &str, content: &str) {
    daybook(root)
        .args(["add", title, "--at", at, "--content", content])
        .assert()
        .success();
}

pub fn daily_file(root: &Path, date: &str) -> PathBuf {
    root.join("daily").join(format!("{}.md", date))
}

/// Parsed JSON from a successful command's stdout
pub fn json_of(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
