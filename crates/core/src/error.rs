// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for kb-core operations.
//!
//! Expected drag conditions (unknown ids, self drops, stale targets) are not
//! errors; they come back as [`crate::reorder::Reorder`] values. The variants
//! here cover storage failures, invalid input and misuse of the drag protocol.

use thiserror::Error;

/// All possible errors that can occur in kb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("ambiguous task ID '{prefix}' matches: {}", matches.join(", "))]
    AmbiguousId {
        prefix: String,
        matches: Vec<String>,
    },

    #[error("task already exists: {0}")]
    DuplicateTask(String),

    #[error("column not found: {0}\n  hint: this board has columns: {1}")]
    ColumnNotFound(String, String),

    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("a board needs at least one column")]
    NoColumns,

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high, urgent")]
    InvalidPriority(String),

    #[error("invalid stamp: {0}")]
    InvalidStamp(String),

    #[error("drag already in progress for task {0}")]
    DragInProgress(String),

    #[error("no drag in progress")]
    NotDragging,

    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),

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

/// A specialized Result type for kb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
