// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::ErrorKind;
use thiserror::Error;

/// All possible errors that can occur in the stintrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'stint init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid project id: must be 2+ lowercase alphanumeric with at least one letter")]
    InvalidProject,

    #[error("cannot derive {item} from {from}")]
    CannotDerive { item: &'static str, from: String },

    #[error("invalid property '{arg}'\n  hint: use --prop name=value")]
    InvalidPropArg { arg: String },

    #[error("invalid workflow file {path}: {reason}")]
    WorkflowFile { path: String, reason: String },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error(transparent)]
    Core(#[from] stint_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(e) => match e.kind() {
                ErrorKind::NotFound => 2,
                ErrorKind::InvalidState => 3,
                ErrorKind::Conflict => 4,
                ErrorKind::InvalidInput => 5,
                ErrorKind::StorageFailure => 1,
            },
            Error::InvalidProject
            | Error::CannotDerive { .. }
            | Error::InvalidPropArg { .. }
            | Error::WorkflowFile { .. }
            | Error::FieldEmpty { .. } => 5,
            Error::NotInitialized
            | Error::AlreadyInitialized(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Config(_) => 1,
        }
    }
}

/// A specialized Result type for stintrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
