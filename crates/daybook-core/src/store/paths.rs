use std::env;
use std::path::{Path, PathBuf};

use crate::error::{JournalError, Result};

/// Environment variable overriding the journal location
pub const JOURNAL_DIR_ENV: &str = "DAYBOOK_DIR";

/// Journal directory name under the home directory
pub const DEFAULT_JOURNAL_DIR: &str = "journal";

/// Journal subdirectories
pub const DAILY_DIR: &str = "daily";
pub const BACKUPS_DIR: &str = "backups";
pub const EXPORTS_DIR: &str = "exports";

/// Configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Suffix of the temporary file written before the atomic rename
pub const TEMP_SUFFIX: &str = ".tmp";

/// Pick the journal root: explicit path, then `DAYBOOK_DIR`, then `~/journal`
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(dir) = env::var_os(JOURNAL_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_JOURNAL_DIR))
        .ok_or_else(|| {
            JournalError::UsageError(format!(
                "cannot determine home directory; pass --root or set {}",
                JOURNAL_DIR_ENV
            ))
        })
}

/// Sibling path used for the write-then-rename step
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
