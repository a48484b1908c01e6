//! Error taxonomy shared by the repository and the command-line front end.
//!
//! Callers match on variants instead of inspecting printed messages:
//! - [`UsageError`] rejects bad input before any storage access
//! - [`TaskError::NotFound`] is raised after loading, without writing
//! - [`StorageError`] covers failures to persist the store
//!
//! Failures to *read* the store never appear here; they are downgraded to an
//! empty store by the storage layer.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes, one per error class.
pub mod exit_code {
    pub const SETUP: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 3;
    pub const STORAGE: i32 = 4;
    pub const IDS_EXHAUSTED: i32 = 5;
}

/// Input rejected before the store is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("A description is required and cannot be empty.")]
    EmptyDescription,
    #[error("You must provide a new description or status to update.")]
    NothingToUpdate,
}

/// Failure to write the store back to its backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cannot write task store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize task store: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by repository operations.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("Task with ID {0} not found.")]
    NotFound(u32),
    #[error("No task IDs left: the store already holds ID {}.", u32::MAX)]
    IdsExhausted,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::Usage(_) => exit_code::USAGE,
            TaskError::NotFound(_) => exit_code::NOT_FOUND,
            TaskError::Storage(_) => exit_code::STORAGE,
            TaskError::IdsExhausted => exit_code::IDS_EXHAUSTED,
        }
    }
}
