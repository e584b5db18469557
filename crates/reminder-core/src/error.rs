//! Shared error taxonomy used across the reminder crates.

use std::path::PathBuf;

/// Errors that halt startup: the config file is absent, malformed, or
/// names a reminder whose schedule does not parse.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    Missing(PathBuf),

    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed toml in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("reminder '{name}': missing required key '{key}'")]
    MissingKey { name: String, key: &'static str },

    #[error("reminder '{name}': invalid schedule '{schedule}': {source}")]
    InvalidSchedule {
        name: String,
        schedule: String,
        #[source]
        source: crate::cron::ParseError,
    },
}

/// Errors the scheduler and presenter surface at runtime. None of these
/// ever terminate the worker; they are logged and the caller is notified
/// at most by a no-op or a caught-and-logged panic boundary.
#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
    #[error("unknown reminder: {0}")]
    UnknownReminder(String),

    #[error("invalid schedule '{schedule}': {source}")]
    InvalidSchedule {
        schedule: String,
        #[source]
        source: crate::cron::ParseError,
    },

    #[error("on_due callback for '{name}' panicked: {message}")]
    CallbackFailure { name: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
