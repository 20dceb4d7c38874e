//! File access with content signatures and atomic replacement

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::backup;
use super::paths::temp_path_for;
use crate::config::BackupConfig;
use crate::error::{JournalError, Result};

/// Fingerprint of a file's content at the time it was read
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    pub len: u64,
    /// Hex SHA-256 of the content; empty for a missing file
    pub hash: String,
    /// Modification time, informational only
    #[serde(skip)]
    pub modified: Option<SystemTime>,
}

impl Signature {
    /// Signature of `text` as it would be stored
    pub fn of(text: &str) -> Self {
        Signature {
            len: text.len() as u64,
            hash: hex::encode(Sha256::digest(text.as_bytes())),
            modified: None,
        }
    }

    /// Signature of a file that does not exist
    pub fn absent() -> Self {
        Signature {
            len: 0,
            hash: String::new(),
            modified: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.hash.is_empty()
    }

    /// Same content (mtime is ignored)
    pub fn matches(&self, other: &Signature) -> bool {
        self.len == other.len && self.hash == other.hash
    }

    fn with_modified(mut self, path: &Path) -> Self {
        self.modified = fs::metadata(path).and_then(|m| m.modified()).ok();
        self
    }
}

/// Durable storage for daily files
pub trait FileStore {
    /// Read a file; a missing file reads as empty text with an absent signature
    fn read_file(&self, path: &Path) -> Result<(String, Signature)>;

    /// Replace a file's content in one step.
    ///
    /// With `expected`, fails with `ConcurrentModification` when the file no
    /// longer matches it. `None` overwrites unconditionally.
    fn write_file_atomic(
        &self,
        path: &Path,
        text: &str,
        expected: Option<&Signature>,
    ) -> Result<Signature>;

    /// Copy the current file into the backup area
    fn backup(&self, path: &Path) -> Result<PathBuf>;

    /// Remove a file, with the same check as `write_file_atomic`
    fn remove_file(&self, path: &Path, expected: Option<&Signature>) -> Result<()>;
}

/// [`FileStore`] over the local filesystem
#[derive(Debug, Clone)]
pub struct DiskStore {
    backup_dir: PathBuf,
    backup: BackupConfig,
}

impl DiskStore {
    pub fn new(backup_dir: impl Into<PathBuf>, backup: BackupConfig) -> Self {
        DiskStore {
            backup_dir: backup_dir.into(),
            backup,
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Signature of the file as it is on disk now
    pub fn current_signature(&self, path: &Path) -> Result<Signature> {
        self.read_file(path).map(|(_, signature)| signature)
    }

    fn check_expected(&self, path: &Path, expected: Option<&Signature>) -> Result<()> {
        let Some(expected) = expected else {
            return Ok(());
        };
        let current = self.current_signature(path)?;
        if current.matches(expected) {
            Ok(())
        } else {
            warn!(
                path = %path.display(),
                expected = %expected.hash,
                found = %current.hash,
                "file changed since load"
            );
            Err(JournalError::ConcurrentModification {
                path: path.to_path_buf(),
            })
        }
    }

    /// Back up `path` if the policy says one is due
    pub fn backup_if_due(&self, path: &Path, now: NaiveDateTime) -> Result<Option<PathBuf>> {
        if !self.backup.enabled || !path.exists() {
            return Ok(None);
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let last = backup::latest_backup(&self.backup_dir, name);
        if !backup::is_due(self.backup.frequency, last, now) {
            return Ok(None);
        }
        backup::backup_file(path, &self.backup_dir, now).map(Some)
    }
}

impl FileStore for DiskStore {
    fn read_file(&self, path: &Path) -> Result<(String, Signature)> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let signature = Signature::of(&text).with_modified(path);
                Ok((text, signature))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok((String::new(), Signature::absent())),
            Err(e) => Err(JournalError::io_operation("read", path.display(), e)),
        }
    }

    fn write_file_atomic(
        &self,
        path: &Path,
        text: &str,
        expected: Option<&Signature>,
    ) -> Result<Signature> {
        self.check_expected(path, expected)?;
        self.backup_if_due(path, Local::now().naive_local())?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| JournalError::io_operation("create", parent.display(), e))?;
        }

        let temp = temp_path_for(path);
        fs::write(&temp, text).map_err(|e| JournalError::io_operation("write", temp.display(), e))?;
        if let Err(e) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(JournalError::io_operation("replace", path.display(), e));
        }

        debug!(path = %path.display(), bytes = text.len(), "file written");
        Ok(Signature::of(text).with_modified(path))
    }

    fn backup(&self, path: &Path) -> Result<PathBuf> {
        backup::backup_file(path, &self.backup_dir, Local::now().naive_local())
    }

    fn remove_file(&self, path: &Path, expected: Option<&Signature>) -> Result<()> {
        self.check_expected(path, expected)?;
        self.backup_if_due(path, Local::now().naive_local())?;
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(JournalError::io_operation("remove", path.display(), e)),
        }
    }
}
