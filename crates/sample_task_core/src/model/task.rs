use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    TextReading,
    ImageDescription,
    PhotoCapture,
}

impl TaskType {
    pub fn label(self) -> &'static str {
        match self {
            Self::TextReading => "Text Reading",
            Self::ImageDescription => "Image Description",
            Self::PhotoCapture => "Photo Capture",
        }
    }
}

/// A completed task. The `id` is overwritten by the store when appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub task_type: TaskType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
    pub duration_sec: u32,
    pub timestamp: String,
}

/// Output of a successful press-and-hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub duration_sec: u32,
    pub audio_path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub count: usize,
    pub total_duration_sec: u64,
}

impl HistorySummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            count: tasks.len(),
            total_duration_sec: tasks.iter().map(|task| u64::from(task.duration_sec)).sum(),
        }
    }
}
