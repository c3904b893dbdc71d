//! Core error types for studyroom-core.
//!
//! Every failure is scoped to a single user action: validation errors are
//! surfaced next to the offending field, API errors roll back the pending
//! request, storage errors leave the in-memory state untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed tagged-line input
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Generative-AI endpoint errors
    #[error("AI request failed: {0}")]
    Api(#[from] ApiError),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored blob could not be decoded
    #[error("Corrupt value under key '{key}': {message}")]
    CorruptBlob { key: String, message: String },

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

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    StartTime,
    EndTime,
    Pages,
    Answer,
    Question,
    Content,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Subject => "subject",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
            Field::Pages => "pages",
            Field::Answer => "answer",
            Field::Question => "question",
            Field::Content => "content",
        };
        f.write_str(name)
    }
}

/// Validation errors and logic guards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A single form field failed validation
    #[error("{field}: {message}")]
    Field { field: Field, message: String },

    /// End time is not after start time (no cross-midnight sessions)
    #[error("Invalid time range: end ({end}) must be later than start ({start})")]
    InvalidTimeRange { start: String, end: String },

    /// Countdown cannot start without a target
    #[error("Countdown target is not set")]
    ZeroTarget,

    /// Countdown target cannot change while the countdown runs
    #[error("Countdown target cannot be changed while running")]
    TargetLocked,

    /// Operation is not valid in the current phase
    #[error("Cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: String },

    /// No record with the given id
    #[error("No entry with id '{0}'")]
    NotFound(String),
}

impl ValidationError {
    pub fn field(field: Field, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field,
            message: message.into(),
        }
    }
}

/// Tagged-line parser errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input contained no records
    #[error("No records found")]
    Empty,

    /// Text appeared before the first labelled line of a record
    #[error("Line {line}: text outside of any field: {text:?}")]
    OrphanLine { line: usize, text: String },

    /// The same label appeared twice in one record
    #[error("Line {line}: duplicate field '{label}'")]
    DuplicateField { line: usize, label: String },

    /// A required label is absent
    #[error("Record {record}: missing required field '{label}'")]
    MissingField { record: usize, label: String },
}

/// Generative-AI client errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (DNS, TLS, timeout...)
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response carried no generated text
    #[error("Empty response from model{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    EmptyResponse(Option<String>),

    /// No API key configured
    #[error("API key not configured (set STUDYROOM_GEMINI_API_KEY or run `auth set-key`)")]
    MissingApiKey,

    /// OS keyring could not be read or written
    #[error("Credential store error: {0}")]
    Credential(#[from] keyring::Error),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
