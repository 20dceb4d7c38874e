//! Error types and exit codes for daybook
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid search pattern)
//! - 3: Data error (missing journal, entry not found, concurrent modification)

mod macros;

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Exit codes for the daybook binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing journal, stale file, unknown entry (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during journal operations
#[derive(Error, Debug)]
pub enum JournalError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid search pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Data errors (exit code 3)
    #[error("journal not found at {path:?} (run `daybook init`)")]
    JournalNotFound { path: PathBuf },

    /// `index` is zero-based; the message shows it one-based.
    #[error("entry {} not found in {date} ({count} entries)", .index + 1)]
    EntryNotFound {
        date: NaiveDate,
        index: usize,
        count: usize,
    },

    #[error("{path:?} was modified since it was loaded")]
    ConcurrentModification { path: PathBuf },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl JournalError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        JournalError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        JournalError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        JournalError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether retrying after a reload (or forcing) could succeed
    pub fn is_conflict(&self) -> bool {
        matches!(self, JournalError::ConcurrentModification { .. })
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            JournalError::UnknownFormat(_)
            | JournalError::UsageError(_)
            | JournalError::InvalidValue { .. }
            | JournalError::InvalidPattern { .. } => ExitCode::Usage,

            JournalError::JournalNotFound { .. }
            | JournalError::EntryNotFound { .. }
            | JournalError::ConcurrentModification { .. }
            | JournalError::NotFound { .. } => ExitCode::Data,

            JournalError::Io(_)
            | JournalError::Json(_)
            | JournalError::Toml(_)
            | JournalError::FailedOperationWithTarget { .. }
            | JournalError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            JournalError::UnknownFormat(_) => "unknown_format",
            JournalError::UsageError(_) => "usage_error",
            JournalError::InvalidValue { .. } => "invalid_value",
            JournalError::InvalidPattern { .. } => "invalid_pattern",
            JournalError::JournalNotFound { .. } => "journal_not_found",
            JournalError::EntryNotFound { .. } => "entry_not_found",
            JournalError::ConcurrentModification { .. } => "concurrent_modification",
            JournalError::NotFound { .. } => "not_found",
            JournalError::Io(_) => "io_error",
            JournalError::Json(_) => "json_error",
            JournalError::Toml(_) => "toml_error",
            JournalError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            JournalError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for daybook operations
pub type Result<T> = std::result::Result<T, JournalError>;
