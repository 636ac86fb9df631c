//! Task list error types

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TaskId;

/// Errors raised by the collaborators that validate, encode and store tasks
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Invalid filter status: {0:?} (expected one of: all, active, completed)")]
    InvalidFilter(String),

    #[error("Duplicate task id: {0}")]
    DuplicateId(TaskId),

    #[error("No task ids left to assign")]
    IdSpaceExhausted,

    #[error("Task store is locked by another process: {0}")]
    Locked(PathBuf),

    #[error("Malformed task on line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for tasklist operations
pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TaskError::NotFound(42).to_string(), "Task not found: 42");
        assert_eq!(TaskError::EmptyTitle.to_string(), "Task title must not be empty");
        assert_eq!(
            TaskError::InvalidFilter("done".to_string()).to_string(),
            "Invalid filter status: \"done\" (expected one of: all, active, completed)"
        );
        assert_eq!(TaskError::IdSpaceExhausted.to_string(), "No task ids left to assign");
    }
}
