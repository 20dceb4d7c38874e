//! Timestamped backup copies of daily files

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::BackupFrequency;
use crate::error::{JournalError, Result};

/// chrono format of the timestamp that prefixes every backup name
pub const BACKUP_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Prefix of full snapshot directories
pub const SNAPSHOT_PREFIX: &str = "backup_";

/// Length of a formatted [`BACKUP_STAMP_FORMAT`] stamp
const STAMP_LEN: usize = 15;

/// `<stamp>` or, when that name is taken, `<stamp>_<n>`
fn stamped(now: NaiveDateTime, n: u32) -> String {
    let stamp = now.format(BACKUP_STAMP_FORMAT).to_string();
    if n == 0 {
        stamp
    } else {
        format!("{}_{}", stamp, n)
    }
}

/// Parse `<stamp>` or `<stamp>_<n>`
fn parse_stamp(text: &str) -> Option<NaiveDateTime> {
    let stamp = text.get(..STAMP_LEN)?;
    let rest = &text[STAMP_LEN..];
    let counter_ok = rest.is_empty()
        || rest
            .strip_prefix('_')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if !counter_ok {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_STAMP_FORMAT).ok()
}

/// Whether a new backup is needed given the most recent one
pub fn is_due(frequency: BackupFrequency, last: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    let Some(last) = last else {
        return true;
    };
    match frequency {
        BackupFrequency::Always => true,
        BackupFrequency::Daily => last.date() < now.date(),
        BackupFrequency::Weekly => {
            let (a, b) = (last.iso_week(), now.iso_week());
            (a.year(), a.week()) < (b.year(), b.week())
        }
        BackupFrequency::Monthly => (last.year(), last.month()) < (now.year(), now.month()),
    }
}

/// Most recent backup covering `file_name`: its own copies or a full snapshot
pub fn latest_backup(backup_dir: &Path, file_name: &str) -> Option<NaiveDateTime> {
    let suffix = format!("_{}", file_name);
    WalkDir::new(backup_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let stamp = if entry.file_type().is_dir() {
                name.strip_prefix(SNAPSHOT_PREFIX)?
            } else {
                name.strip_suffix(&suffix)?
            };
            parse_stamp(stamp)
        })
        .max()
}

/// Create a file under a stamped name that does not exist yet
fn create_unique(dir: &Path, now: NaiveDateTime, name: &str) -> io::Result<(PathBuf, File)> {
    let mut n = 0;
    loop {
        let target = dir.join(format!("{}_{}", stamped(now, n), name));
        match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => return Ok((target, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Create a directory under a stamped name that does not exist yet
fn create_unique_dir(dir: &Path, now: NaiveDateTime) -> io::Result<PathBuf> {
    let mut n = 0;
    loop {
        let target = dir.join(format!("{}{}", SNAPSHOT_PREFIX, stamped(now, n)));
        match fs::create_dir(&target) {
            Ok(()) => return Ok(target),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Copy `path` to `<backup_dir>/<stamp>_<name>`.
///
/// An existing backup is never overwritten: a second copy in the same second
/// goes to `<stamp>_<n>_<name>`.
pub fn backup_file(path: &Path, backup_dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| JournalError::invalid_value("backup source", path.display()))?;
    fs::create_dir_all(backup_dir)
        .map_err(|e| JournalError::io_operation("create", backup_dir.display(), e))?;

    let mut source =
        File::open(path).map_err(|e| JournalError::io_operation("back up", path.display(), e))?;
    let (target, mut file) = create_unique(backup_dir, now, name)
        .map_err(|e| JournalError::io_operation("create", backup_dir.display(), e))?;
    io::copy(&mut source, &mut file)
        .map_err(|e| JournalError::io_operation("back up", path.display(), e))?;
    debug!(source = %path.display(), backup = %target.display(), "backed up file");
    Ok(target)
}

/// Result of a full snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub path: PathBuf,
    pub files: usize,
}

/// Copy every file of `source_dir` into a new `<backup_dir>/backup_<stamp>/`
pub fn snapshot(source_dir: &Path, backup_dir: &Path, now: NaiveDateTime) -> Result<Snapshot> {
    fs::create_dir_all(backup_dir)
        .map_err(|e| JournalError::io_operation("create", backup_dir.display(), e))?;
    let target = create_unique_dir(backup_dir, now)
        .map_err(|e| JournalError::io_operation("create", backup_dir.display(), e))?;

    let mut files = 0;
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        fs::copy(entry.path(), target.join(entry.file_name()))
            .map_err(|e| JournalError::io_operation("back up", entry.path().display(), e))?;
        files += 1;
    }

    info!(path = %target.display(), files, "snapshot created");
    Ok(Snapshot {
        path: target,
        files,
    })
}
