//! Journal configuration for daybook
//!
//! Configuration is stored in `<journal root>/config.toml`. A missing file means
//! defaults; the core never mutates the loaded value, callers pass it in.

pub mod types;

use std::fmt::Write;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{JournalError, Result};

pub use types::{
    BackupConfig, BackupFrequency, EditorConfig, JournalConfig, TagConfig, CONFIG_FORMAT_VERSION,
};

impl JournalConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: JournalConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config missing, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| JournalError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the rest of the system cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tags.prefixes.iter().any(|p| p.is_empty()) {
            crate::bail_invalid!("tag prefix", "\"\" (prefixes must be non-empty)");
        }
        if self.editor.viewport_height == 0 {
            crate::bail_invalid!("editor.viewport_height", 0);
        }
        // chrono panics when displaying an invalid format, so render through fmt::Write
        let probe = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
        let mut stem = String::new();
        let rendered = write!(stem, "{}", probe.format(&self.date_format)).is_ok();
        if !rendered || NaiveDate::parse_from_str(&stem, &self.date_format).ok() != Some(probe) {
            crate::bail_invalid!("date_format", &self.date_format);
        }
        Ok(())
    }

    /// Filename of the daily file for `date`, e.g. `2024-03-01.md`
    pub fn file_name_for(&self, date: NaiveDate) -> String {
        format!("{}.{}", date.format(&self.date_format), self.extension)
    }

    /// Recover the date from a daily filename; `None` for unrelated files
    pub fn date_from_file_name(&self, name: &str) -> Option<NaiveDate> {
        let stem = name.strip_suffix(&format!(".{}", self.extension))?;
        NaiveDate::parse_from_str(stem, &self.date_format).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = JournalConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.extension, "md");
        assert_eq!(config.tags.prefixes, vec!["#".to_string(), "@".to_string()]);
        assert!(config.tags.auto_detect);
        assert!(config.backup.enabled);
        assert_eq!(config.backup.frequency, BackupFrequency::Daily);
        assert_eq!(config.editor.viewport_height, 20);
        assert!(config.editor.command.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = JournalConfig::default();
        config.tags.prefixes = vec!["+".to_string()];
        config.backup.frequency = BackupFrequency::Weekly;
        config.save(&path).unwrap();

        let loaded = JournalConfig::load(&path).unwrap();
        assert_eq!(loaded.tags.prefixes, vec!["+".to_string()]);
        assert_eq!(loaded.backup.frequency, BackupFrequency::Weekly);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[backup]\nfrequency = \"monthly\"\n").unwrap();

        let loaded = JournalConfig::load(&path).unwrap();
        assert_eq!(loaded.backup.frequency, BackupFrequency::Monthly);
        assert!(loaded.backup.enabled);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = JournalConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.extension, "md");
    }

    #[test]
    fn test_rejects_empty_prefix() {
        let mut config = JournalConfig::default();
        config.tags.prefixes.push(String::new());
        assert!(matches!(
            config.validate(),
            Err(JournalError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rejects_lossy_date_format() {
        let config = JournalConfig {
            date_format: "%Y-%m".to_string(),
            ..JournalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_specifier() {
        let config = JournalConfig {
            date_format: "%Q".to_string(),
            ..JournalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_name_round_trip() {
        let config = JournalConfig::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let name = config.file_name_for(date);
        assert_eq!(name, "2024-03-01.md");
        assert_eq!(config.date_from_file_name(&name), Some(date));
        assert_eq!(config.date_from_file_name("notes.md"), None);
        assert_eq!(config.date_from_file_name("2024-03-01.txt"), None);
    }
}
