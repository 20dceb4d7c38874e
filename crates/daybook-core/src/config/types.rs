//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Journal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// chrono format of the daily filename stem
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Daily file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Tag detection settings
    #[serde(default)]
    pub tags: TagConfig,

    /// Backup-before-overwrite settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Interactive editor settings
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            date_format: default_date_format(),
            extension: default_extension(),
            tags: TagConfig::default(),
            backup: BackupConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

/// Tag detection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Prefixes that mark an inline tag (`#work`, `@mom`)
    #[serde(default = "default_tag_prefixes")]
    pub prefixes: Vec<String>,

    /// Detect tags in entry content on save
    #[serde(default = "default_true")]
    pub auto_detect: bool,

    /// Append detected tags to the manual ones
    #[serde(default = "default_true")]
    pub merge_detected: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            prefixes: default_tag_prefixes(),
            auto_detect: true,
            merge_detected: true,
        }
    }
}

/// How often a daily file is copied to the backup directory before overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    /// Before every overwrite
    Always,
    /// At most once per calendar day
    #[default]
    Daily,
    /// At most once per ISO week
    Weekly,
    /// At most once per calendar month
    Monthly,
}

/// Backup-before-overwrite settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub frequency: BackupFrequency,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: BackupFrequency::default(),
        }
    }
}

/// Interactive editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Visible text rows in the built-in editor
    #[serde(default = "default_viewport_height")]
    pub viewport_height: usize,

    /// External editor command used instead of the built-in one (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            command: None,
        }
    }
}

fn default_version() -> u32 {
    CONFIG_FORMAT_VERSION
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_tag_prefixes() -> Vec<String> {
    vec!["#".to_string(), "@".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_viewport_height() -> usize {
    20
}
