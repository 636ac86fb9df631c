//! Filter status and the selection it drives

use serde::{Deserialize, Serialize};

use super::task::Task;
use crate::error::TaskError;

/// Selection mode over a task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterStatus {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl FilterStatus {
    /// Every variant, in display order
    pub const ALL: [FilterStatus; 3] = [FilterStatus::All, FilterStatus::Active, FilterStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Whether `task` belongs to this view
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Iterate the tasks in this view, keeping collection order
    pub fn apply<'a>(self, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        tasks.iter().filter(move |t| self.matches(t))
    }
}

impl std::fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilterStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskError::InvalidFilter(s.to_string())),
        }
    }
}

/// Number of tasks in each view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn get(&self, filter: FilterStatus) -> usize {
        match filter {
            FilterStatus::All => self.all,
            FilterStatus::Active => self.active,
            FilterStatus::Completed => self.completed,
        }
    }
}
