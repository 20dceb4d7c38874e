//! Journal storage
//!
//! A journal is a directory holding one markdown file per day:
//!
//! ```text
//! <root>/
//!   config.toml
//!   daily/2024-03-01.md
//!   backups/
//!   exports/
//! ```
//!
//! Every mutation is parse, edit span, write-whole-file, checked against the
//! signature captured when the file was loaded.

pub mod backup;
pub mod io;
pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;
use walkdir::WalkDir;

use crate::config::JournalConfig;
use crate::entry::{self, merge_tags, Entry, JournalFile, TagExtractor};
use crate::error::{JournalError, Result};
use crate::search::{DateRange, SearchQuery, SearchReport};
use crate::stats::{count_tags, JournalStats, TagCount};
pub use backup::Snapshot;
pub use io::{DiskStore, FileStore, Signature};
pub use paths::{resolve_root, BACKUPS_DIR, CONFIG_FILE, DAILY_DIR, EXPORTS_DIR};

/// A daily file together with the signature it was read under
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub file: JournalFile,
    pub signature: Signature,
}

/// Location of one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryRef {
    pub date: NaiveDate,
    /// Zero-based
    pub index: usize,
}

/// An opened journal directory
#[derive(Debug)]
pub struct Journal {
    root: PathBuf,
    config: JournalConfig,
    store: DiskStore,
}

impl Journal {
    /// Create the directory layout and a default config; safe to repeat
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn init(root: &Path) -> Result<Self> {
        for dir in [DAILY_DIR, BACKUPS_DIR, EXPORTS_DIR] {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .map_err(|e| JournalError::io_operation("create", path.display(), e))?;
        }
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            JournalConfig::default().save(&config_path)?;
            info!(path = %config_path.display(), "wrote default config");
        }
        Self::open(root)
    }

    /// Open an existing journal
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn open(root: &Path) -> Result<Self> {
        if !root.join(DAILY_DIR).is_dir() {
            return Err(JournalError::JournalNotFound {
                path: root.to_path_buf(),
            });
        }
        let config = JournalConfig::load_or_default(&root.join(CONFIG_FILE))?;
        Ok(Self::with_config(root, config))
    }

    /// Journal at `root` using `config` instead of the file on disk
    pub fn with_config(root: &Path, config: JournalConfig) -> Self {
        let store = DiskStore::new(root.join(BACKUPS_DIR), config.backup.clone());
        Journal {
            root: root.to_path_buf(),
            config,
            store,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn store(&self) -> &DiskStore {
        &self.store
    }

    pub fn daily_dir(&self) -> PathBuf {
        self.root.join(DAILY_DIR)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_DIR)
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIR)
    }

    /// Path of the daily file for `date`, whether or not it exists
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.daily_dir().join(self.config.file_name_for(date))
    }

    /// Dates that have a daily file, ascending
    pub fn list_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = WalkDir::new(self.daily_dir())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let name = e.file_name().to_str()?;
                self.config.date_from_file_name(name)
            })
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    /// Read and parse one day; a missing file loads as empty
    pub fn load(&self, date: NaiveDate) -> Result<LoadedFile> {
        let path = self.path_for(date);
        let (text, signature) = self.store.read_file(&path)?;
        let file = JournalFile::parse(date, text).with_path(path);
        Ok(LoadedFile { file, signature })
    }

    /// Every day, ascending
    pub fn load_all(&self) -> Result<Vec<LoadedFile>> {
        self.load_range(DateRange::default())
    }

    /// Days within `range`, ascending
    pub fn load_range(&self, range: DateRange) -> Result<Vec<LoadedFile>> {
        let start = Instant::now();
        let files = self
            .list_dates()?
            .into_iter()
            .filter(|date| range.contains(*date))
            .map(|date| self.load(date))
            .collect::<Result<Vec<_>>>()?;
        crate::trace_time!(start, "load_range", files = files.len());
        Ok(files)
    }

    /// Tags found in `content` with the configured prefixes
    pub fn detect_tags(&self, content: &str) -> Vec<String> {
        TagExtractor::from_config(&self.config.tags).extract(content)
    }

    /// Apply tag detection to an entry about to be written.
    ///
    /// Detected tags are only ever added; existing tags are never removed.
    /// The timestamp is cut to whole seconds and the title folded onto one
    /// line.
    pub fn prepare(&self, entry: Entry) -> Entry {
        let mut entry = entry.normalized();
        let tags = &self.config.tags;
        if tags.auto_detect && tags.merge_detected {
            let detected = self.detect_tags(&entry.content);
            entry.tags = merge_tags(&entry.tags, &detected);
        }
        entry
    }

    /// Append an entry to the file of its timestamp's date
    pub fn add_entry(&self, entry: Entry) -> Result<EntryRef> {
        let entry = self.prepare(entry);
        entry.validate()?;
        let date = entry.date();
        let loaded = self.load(date)?;
        let text = entry::insert_append(&loaded.file.raw_text, &entry);
        self.store
            .write_file_atomic(&self.path_for(date), &text, Some(&loaded.signature))?;

        let index = loaded.file.len();
        info!(%date, index, title = %entry.title, "entry added");
        Ok(EntryRef { date, index })
    }

    /// Replace one entry.
    ///
    /// `expected` is the signature the caller loaded the file under; `None`
    /// skips that check but the write is still guarded against changes made
    /// while this call runs.
    pub fn replace_entry(
        &self,
        date: NaiveDate,
        index: usize,
        entry: Entry,
        expected: Option<&Signature>,
    ) -> Result<Signature> {
        let loaded = self.load(date)?;
        let path = self.path_for(date);
        ensure_unchanged(&path, &loaded.signature, expected)?;

        let entry = self.prepare(entry);
        entry.validate()?;
        let text = entry::replace(&loaded.file, index, &entry)?;
        let signature = self
            .store
            .write_file_atomic(&path, &text, Some(&loaded.signature))?;
        info!(%date, index, "entry replaced");
        Ok(signature)
    }

    /// Remove one entry, deleting the daily file once nothing is left in it
    pub fn delete_entry(
        &self,
        date: NaiveDate,
        index: usize,
        expected: Option<&Signature>,
    ) -> Result<Entry> {
        let loaded = self.load(date)?;
        let path = self.path_for(date);
        ensure_unchanged(&path, &loaded.signature, expected)?;

        let removed = loaded
            .file
            .entry(index)
            .cloned()
            .ok_or(JournalError::EntryNotFound {
                date,
                index,
                count: loaded.file.len(),
            })?;
        let text = entry::delete(&loaded.file, index)?;

        if text.trim().is_empty() {
            self.store.remove_file(&path, Some(&loaded.signature))?;
            info!(%date, index, "entry deleted, daily file removed");
        } else {
            self.store
                .write_file_atomic(&path, &text, Some(&loaded.signature))?;
            info!(%date, index, "entry deleted");
        }
        Ok(removed)
    }

    /// Run `query` over every daily file
    pub fn search(&self, query: &SearchQuery) -> Result<SearchReport> {
        let loaded = self.load_all()?;
        Ok(query.run(loaded.iter().map(|l| &l.file)))
    }

    pub fn stats(&self) -> Result<JournalStats> {
        let loaded = self.load_all()?;
        Ok(JournalStats::compute(loaded.iter().map(|l| &l.file)))
    }

    /// Every tag with its use count, most used first
    pub fn tag_counts(&self) -> Result<Vec<TagCount>> {
        let loaded = self.load_all()?;
        Ok(count_tags(loaded.iter().flat_map(|l| l.file.iter())))
    }

    /// Copy every daily file into a timestamped snapshot directory
    pub fn backup_all(&self) -> Result<Snapshot> {
        backup::snapshot(
            &self.daily_dir(),
            &self.backups_dir(),
            Local::now().naive_local(),
        )
    }
}

fn ensure_unchanged(path: &Path, loaded: &Signature, expected: Option<&Signature>) -> Result<()> {
    match expected {
        Some(expected) if !expected.matches(loaded) => Err(JournalError::ConcurrentModification {
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}
