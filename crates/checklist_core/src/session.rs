use crate::error::AppError;
use crate::list::TaskList;
use crate::model::{Filter, Stats, Task};
use crate::storage::json_store;
use std::path::PathBuf;

/// A task list bound to its store. The collection is loaded once at open
/// and written back after every mutation; the caller owns the instance and
/// threads it through the UI event handlers.
///
/// Storage fails soft: a load failure yields an empty list, a save failure
/// leaves the in-memory mutation in place. Either way the most recent
/// failure stays observable through [`Session::storage_error`].
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    list: TaskList,
    storage_error: Option<AppError>,
}

impl Session {
    pub fn open(path: PathBuf) -> Self {
        match json_store::load_tasks(&path) {
            Ok(tasks) => Session {
                path,
                list: TaskList::from_tasks(tasks),
                storage_error: None,
            },
            Err(err) => Session {
                path,
                list: TaskList::new(),
                storage_error: Some(err),
            },
        }
    }

    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::open(json_store::store_path()?))
    }

    pub fn add(&mut self, text: &str) -> Result<Task, AppError> {
        let task = self.list.add(text)?.clone();
        self.persist();
        Ok(task)
    }

    pub fn toggle(&mut self, id: u64) -> Option<Task> {
        let task = self.list.toggle(id)?.clone();
        self.persist();
        Some(task)
    }

    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let task = self.list.delete(id)?;
        self.persist();
        Some(task)
    }

    pub fn clear_completed(&mut self) -> usize {
        let removed = self.list.clear_completed();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.list.set_filter(filter);
    }

    pub fn filter(&self) -> Filter {
        self.list.filter()
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Task> {
        self.list.filtered()
    }

    pub fn stats(&self) -> Stats {
        self.list.stats()
    }

    /// The most recent storage failure, if any. Cleared by the next
    /// successful write.
    pub fn storage_error(&self) -> Option<&AppError> {
        self.storage_error.as_ref()
    }

    /// Explicit write-back, used on interactive exit.
    pub fn flush(&mut self) -> Result<(), AppError> {
        let result = json_store::save_tasks(&self.path, self.list.tasks());
        self.storage_error = result.clone().err();
        result
    }

    fn persist(&mut self) {
        self.storage_error = json_store::save_tasks(&self.path, self.list.tasks()).err();
    }
}
