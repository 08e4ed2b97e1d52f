//! Error types.
//!
//! [`ScheduleError`] is the structured rejection returned by every write
//! path. Its `Display` text is meant to be shown to the operator verbatim.

use std::path::PathBuf;

use crate::models::EntryId;
use crate::scheduler::Conflict;

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Rejection of a scheduling request.
///
/// None of these are transient: the operator has to change the request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// Venue, day or start time missing or unknown.
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    /// Not exactly one of work/group given, or the reference is unknown.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// The requested interval intersects an existing entry in the same venue and day.
    #[error("{0}")]
    OverlapConflict(Conflict),

    /// Unknown schedule entry.
    #[error("Schedule entry {0} not found")]
    NotFound(EntryId),
}

impl ScheduleError {
    /// Short machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::InvalidPlacement(_) => "INVALID_PLACEMENT",
            ScheduleError::InvalidContent(_) => "INVALID_CONTENT",
            ScheduleError::OverlapConflict(_) => "OVERLAP_CONFLICT",
            ScheduleError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse catalog seed {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timeline window: {0}")]
    InvalidWindow(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Illegal drag interaction transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// Another entry is being dragged; only one drag session at a time.
    #[error("Entry {0} is already being dragged")]
    SessionActive(EntryId),

    /// A commit for this entry is still in flight.
    #[error("A move of entry {0} is still being saved")]
    CommitPending(EntryId),

    /// The event requires an active drag.
    #[error("No drag in progress")]
    NotDragging,

    /// No pending commit exists for this entry.
    #[error("No pending move for entry {0}")]
    NoPendingCommit(EntryId),
}
