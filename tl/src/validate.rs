//! Input checks applied before tasks reach the store
//!
//! Filter tokens are checked by `FilterStatus::from_str`.

use std::collections::HashSet;

use crate::domain::Task;
use crate::error::{Result, TaskError};

/// Trim a title, rejecting one that is empty afterwards
pub fn title(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Fail if any stored title is blank
pub fn titles(tasks: &[Task]) -> Result<()> {
    if tasks.iter().any(|t| t.title.trim().is_empty()) {
        return Err(TaskError::EmptyTitle);
    }
    Ok(())
}

/// Fail on the first id that appears twice; drafts are ignored
pub fn unique_ids(tasks: &[Task]) -> Result<()> {
    let mut seen = HashSet::new();
    for id in tasks.iter().filter_map(|t| t.id) {
        if !seen.insert(id) {
            return Err(TaskError::DuplicateId(id));
        }
    }
    Ok(())
}
