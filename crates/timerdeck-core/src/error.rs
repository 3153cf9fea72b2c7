//! Core error types for timerdeck-core.
//!
//! Board operations, persistence and configuration all report through
//! [`CoreError`]. Storage failures during best-effort persistence are logged
//! by the caller rather than returned.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timerdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No timer with the given id (or id prefix)
    #[error("Timer not found: {0}")]
    TimerNotFound(String),

    /// Id prefix matched more than one timer
    #[error("Ambiguous timer id '{prefix}' matches {matches} timers")]
    AmbiguousId { prefix: String, matches: usize },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another process
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is blank
    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    /// Duration of zero seconds
    #[error("Duration must be greater than zero")]
    ZeroDuration,

    /// Duration string could not be parsed
    #[error("Invalid duration '{0}': expected e.g. 90, 90s, 25m, 1h30m, 25:00 or 1:30:00")]
    BadDuration(String),

    /// Remaining time outside `[0, duration]`
    #[error("Remaining time {remaining}s exceeds duration {duration}s")]
    RemainingOutOfRange { remaining: u64, duration: u64 },

    /// Status inconsistent with remaining time
    #[error("Status '{status}' is inconsistent with remaining time {remaining}s")]
    InconsistentStatus { status: String, remaining: u64 },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
