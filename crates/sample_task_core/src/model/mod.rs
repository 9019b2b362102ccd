mod screen;
mod task;

pub use screen::{Screen, TaskChoice};
pub use task::{HistorySummary, Recording, Task, TaskType};
