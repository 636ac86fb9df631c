//! File-backed task store
//!
//! Owns a task collection persisted as a pretty-printed JSON array. The store
//! is the only place ids are assigned: a new task gets one past the largest id
//! present, and ids never change once assigned. Every mutation is written back
//! before the call returns.
//!
//! An open store holds an exclusive lock on `<file>.lock` until it is dropped,
//! so a second store on the same file waits (or fails with `try_open`) instead
//! of working from a stale copy.

use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::codec::{self, Format};
use crate::domain::{FilterCounts, FilterStatus, Task, TaskId, Tasks};
use crate::error::{Result, TaskError};
use crate::validate;

/// How imported tasks are merged into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Append after existing tasks, assigning fresh ids
    #[default]
    Append,
    /// Replace the collection, keeping incoming ids
    Replace,
}

/// Hands out ascending ids after the largest one present
struct IdAllocator {
    /// `None` once `TaskId::MAX` has been handed out
    next: Option<TaskId>,
}

impl IdAllocator {
    fn after(tasks: &[Task]) -> Self {
        let next = match tasks.iter().filter_map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self { next }
    }

    fn allocate(&mut self) -> Result<TaskId> {
        let id = self.next.ok_or(TaskError::IdSpaceExhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Give every draft in `tasks` an id, returning how many were assigned
fn assign_missing_ids(tasks: &mut [Task]) -> Result<usize> {
    if tasks.iter().all(Task::is_persisted) {
        return Ok(0);
    }

    let mut ids = IdAllocator::after(tasks);
    let mut assigned = 0;
    for task in tasks.iter_mut().filter(|t| !t.is_persisted()) {
        task.id = Some(ids.allocate()?);
        assigned += 1;
    }
    Ok(assigned)
}

/// Path next to `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("tasks"));
    name.push(suffix);
    path.with_file_name(name)
}

/// The task store
pub struct TaskStore {
    /// Collection file
    path: PathBuf,
    /// Tasks in display order
    tasks: Tasks,
    /// Exclusive lock, released when the store is dropped
    _lock: File,
}

impl TaskStore {
    /// Open the store at `path`, waiting for any other holder of its lock.
    ///
    /// Parent directories are created as needed. A missing or blank file is
    /// an empty collection. Drafts found in the file are given ids and
    /// written back.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let lock = Self::lock_file(&path)?;
        lock.lock_exclusive()?;
        Self::load(path, lock)
    }

    /// Like `open`, but fail with `Locked` instead of waiting
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let lock = Self::lock_file(&path)?;
        if let Err(e) = lock.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                return Err(TaskError::Locked(path));
            }
            return Err(e.into());
        }
        Self::load(path, lock)
    }

    fn lock_file(path: &Path) -> Result<File> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let lock = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(sibling(path, ".lock"))?;
        Ok(lock)
    }

    fn load(path: PathBuf, lock: File) -> Result<Self> {
        let mut tasks = match fs::read_to_string(&path) {
            Ok(content) => codec::decode(&content, Format::Json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        validate::titles(&tasks)?;
        validate::unique_ids(&tasks)?;

        let assigned = assign_missing_ids(&mut tasks)?;
        let store = Self {
            path,
            tasks,
            _lock: lock,
        };
        if assigned > 0 {
            info!(assigned, "Assigned ids to stored drafts");
            store.persist()?;
        }

        debug!(path = ?store.path, count = store.tasks.len(), "Opened task store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All tasks in order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks in the given view, in order
    pub fn list(&self, filter: FilterStatus) -> Vec<&Task> {
        filter.apply(&self.tasks).collect()
    }

    pub fn counts(&self) -> FilterCounts {
        FilterCounts::of(&self.tasks)
    }

    /// Cloned view for export
    pub fn export(&self, filter: FilterStatus) -> Tasks {
        filter.apply(&self.tasks).cloned().collect()
    }

    pub fn get(&self, id: TaskId) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == Some(id))
            .ok_or(TaskError::NotFound(id))
    }

    /// Add a new active task and return it with its assigned id
    pub fn add(&mut self, title: &str) -> Result<&Task> {
        let title = validate::title(title)?;
        let id = IdAllocator::after(&self.tasks).allocate()?;
        let idx = self.tasks.len();
        self.tasks.push(Task::with_id(id, title, false));
        self.persist()?;
        info!(id, "Added task");
        Ok(&self.tasks[idx])
    }

    pub fn rename(&mut self, id: TaskId, title: &str) -> Result<()> {
        let title = validate::title(title)?;
        self.get_mut(id)?.title = title;
        self.persist()?;
        info!(id, "Renamed task");
        Ok(())
    }

    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<()> {
        self.get_mut(id)?.completed = completed;
        self.persist()?;
        info!(id, completed, "Set task completion");
        Ok(())
    }

    /// Flip completion, returning the new state
    pub fn toggle(&mut self, id: TaskId) -> Result<bool> {
        let completed = self.get_mut(id)?.toggle();
        self.persist()?;
        info!(id, completed, "Toggled task");
        Ok(completed)
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let idx = self.position(id)?;
        let task = self.tasks.remove(idx);
        self.persist()?;
        info!(id, "Removed task");
        Ok(task)
    }

    /// Remove every completed task, returning how many went
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist()?;
        }
        info!(removed, "Cleared completed tasks");
        Ok(removed)
    }

    /// Reorder so that `id` sits directly before `target`
    pub fn move_before(&mut self, id: TaskId, target: TaskId) -> Result<()> {
        let src = self.position(id)?;
        let dst = self.position(target)?;
        if src == dst {
            return Ok(());
        }

        let task = self.tasks.remove(src);
        let insert_at = if src < dst { dst - 1 } else { dst };
        self.tasks.insert(insert_at, task);
        self.persist()?;
        info!(id, target, "Moved task");
        Ok(())
    }

    /// Merge `incoming` into the store, returning how many tasks were imported.
    ///
    /// Nothing changes unless every incoming task is accepted.
    pub fn import(&mut self, incoming: Tasks, mode: ImportMode) -> Result<usize> {
        let mut incoming = incoming;
        for task in &mut incoming {
            task.title = validate::title(&task.title)?;
        }
        let count = incoming.len();

        match mode {
            ImportMode::Append => {
                let mut ids = IdAllocator::after(&self.tasks);
                for task in &mut incoming {
                    task.id = Some(ids.allocate()?);
                }
                self.tasks.extend(incoming);
            }
            ImportMode::Replace => {
                validate::unique_ids(&incoming)?;
                assign_missing_ids(&mut incoming)?;
                self.tasks = incoming;
            }
        }

        self.persist()?;
        info!(count, ?mode, "Imported tasks");
        Ok(count)
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == Some(id))
            .ok_or(TaskError::NotFound(id))
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or(TaskError::NotFound(id))
    }

    /// Write the collection via temp file and rename; the lock is already held
    fn persist(&self) -> Result<()> {
        let tmp = sibling(&self.path, ".tmp");
        fs::write(&tmp, codec::encode(&self.tasks, Format::Json)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = ?self.path, count = self.tasks.len(), "Persisted tasks");
        Ok(())
    }
}
