use crate::error::AppError;
use crate::model::{Filter, Stats, Task};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The in-memory task collection plus the current filter state.
///
/// Tasks are kept newest-first by insertion. Ids come from a monotonic
/// counter seeded one past the highest id seen at load time, so they stay
/// unique across save/load cycles.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: Filter,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList {
            tasks: Vec::new(),
            filter: Filter::All,
            next_id: 1,
        }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().map_or(1, |id| id + 1);
        TaskList {
            tasks,
            filter: Filter::All,
            next_id,
        }
    }

    /// Prepend a fresh pending task. Rejects text that trims to empty
    /// without touching the collection.
    pub fn add(&mut self, text: &str) -> Result<&Task, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("task text is required"));
        }

        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        let task = Task {
            id: self.next_id,
            text: trimmed.to_string(),
            completed: false,
            created_at,
        };
        self.next_id += 1;
        self.tasks.insert(0, task);

        Ok(&self.tasks[0])
    }

    /// Flip the completion flag of the first task with this id. Absent ids
    /// are a no-op.
    pub fn toggle(&mut self, id: u64) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(&*task)
    }

    /// Remove the task with this id. Absent ids are a no-op.
    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Drop every completed task, keeping the survivors in order. Returns
    /// how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        before - self.tasks.len()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Lazy view of the tasks matching the current filter, in collection
    /// order. Restart by calling again.
    pub fn filtered(&self) -> impl Iterator<Item = &Task> {
        let filter = self.filter;
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|task| task.completed).count(),
        }
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}
