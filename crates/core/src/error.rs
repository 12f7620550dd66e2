// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for stint-core operations.

use thiserror::Error;

/// All possible errors that can occur in stint-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("work not found: {0}")]
    WorkNotFound(String),

    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),

    #[error("work is archived: {0}\n  hint: unarchive it before moving or reporting on it")]
    WorkArchived(String),

    #[error("unknown state '{state}' in workflow {flow_id}\n  hint: known states are: {known}")]
    UnknownState {
        flow_id: String,
        state: String,
        known: String,
    },

    #[error("no transition from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    NoSuchTransition {
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("work {work_id} changed concurrently (expected revision {expected_revision})\n  hint: re-read the work and try again")]
    Conflict {
        work_id: String,
        expected_revision: i64,
    },

    #[error("invalid workflow: {0}")]
    InvalidWorkflow(String),

    #[error("invalid property '{name}': {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("invalid category: '{0}'\n  hint: valid categories are: backlog, in_process, done")]
    InvalidCategory(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// Coarse classification of an [`Error`], used by callers to pick a
/// response (404-, 400-, 409- or 500-equivalent) without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced work item or workflow does not exist.
    NotFound,
    /// The requested state is unknown or unreachable from the current one.
    InvalidState,
    /// The work item changed between read and commit. Safe to retry once.
    Conflict,
    /// Malformed input (workflow definition, property values, timestamps).
    InvalidInput,
    /// Underlying persistence failure. Nothing was committed.
    StorageFailure,
}

impl Error {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::WorkNotFound(_) | Error::WorkflowNotFound(_) | Error::WorkArchived(_) => {
                ErrorKind::NotFound
            }
            Error::UnknownState { .. } | Error::NoSuchTransition { .. } => ErrorKind::InvalidState,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::InvalidWorkflow(_)
            | Error::InvalidProperty { .. }
            | Error::InvalidCategory(_)
            | Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::StorageFailure
            }
        }
    }

    /// Returns true if the operation may succeed after re-reading the work item.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

/// A specialized Result type for stint-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
