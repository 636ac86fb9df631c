//! Domain types for tasklist
//!
//! The task model is a plain data shape: a `Task`, an ordered `Tasks`
//! collection and the closed `FilterStatus` set. Nothing here validates or
//! persists; the store and validator are the collaborators that do.

mod filter;
mod task;

pub use filter::{FilterCounts, FilterStatus};
pub use task::{Task, TaskId, Tasks};
