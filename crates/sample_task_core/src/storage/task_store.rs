use crate::model::{HistorySummary, Task};
use tracing::info;

/// Completed tasks for the running session, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task`, replacing its id with the next position (1-based).
    pub fn append(&mut self, mut task: Task) -> u64 {
        let id = self.tasks.len() as u64 + 1;
        task.id = id;
        info!(id, task_type = ?task.task_type, duration_sec = task.duration_sec, "task recorded");
        self.tasks.push(task);
        id
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
