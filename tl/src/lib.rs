//! tasklist - a task list model with a file-backed store
//!
//! The model is three plain shapes: [`Task`], the ordered [`Tasks`]
//! collection and the closed [`FilterStatus`] set. Around it sit the
//! collaborators that give it behavior: a validator, a JSON/JSON Lines codec
//! and a [`TaskStore`] that assigns ids and persists every change.
//!
//! # Storage
//!
//! ```text
//! ~/.local/share/tasklist/
//! ├── tasks.json        # [{"id": 1, "title": "...", "completed": false}, ...]
//! └── tasks.json.lock   # advisory lock held while writing
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tasklist::{FilterStatus, TaskStore};
//!
//! let mut store = TaskStore::open("tasks.json")?;
//! let id = store.add("Buy milk")?.id;
//! store.toggle(id.unwrap())?;
//! for task in store.list(FilterStatus::Completed) {
//!     println!("{}", task.title);
//! }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
mod store;
pub mod validate;

pub use codec::Format;
pub use config::Config;
pub use domain::{FilterCounts, FilterStatus, Task, TaskId, Tasks};
pub use error::{Result, TaskError};
pub use store::{ImportMode, TaskStore};
