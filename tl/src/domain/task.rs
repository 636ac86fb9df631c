//! Task record and task collection

use serde::{Deserialize, Serialize};

/// Durable identifier assigned to a task when it is persisted
pub type TaskId = u64;

/// A single to-do entry.
///
/// `id` is `None` for a draft that has not been persisted yet. Once a store
/// assigns an id it never changes; `title` and `completed` are free to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable handle, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Text label
    pub title: String,

    /// Whether the task has been marked done
    pub completed: bool,
}

/// Ordered sequence of tasks
pub type Tasks = Vec<Task>;

impl Task {
    /// Create an unpersisted, not-yet-completed task
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            completed: false,
        }
    }

    /// Create a task that already carries an id
    pub fn with_id(id: TaskId, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            completed,
        }
    }

    /// True once an id has been assigned
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Flip the completion flag, returning the new value
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
