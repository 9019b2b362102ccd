use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Start,
    NoiseTest,
    TaskSelection,
    TextReading,
    ImageDescription,
    PhotoCapture,
    TaskHistory,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::NoiseTest => "Noise Test",
            Self::TaskSelection => "Task Selection",
            Self::TextReading => "Text Reading",
            Self::ImageDescription => "Image Description",
            Self::PhotoCapture => "Photo Capture",
            Self::TaskHistory => "Task History",
        }
    }

    pub fn is_task_screen(self) -> bool {
        matches!(
            self,
            Self::TextReading | Self::ImageDescription | Self::PhotoCapture
        )
    }
}

/// Entries offered on the task selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskChoice {
    TextReading,
    ImageDescription,
    PhotoCapture,
    History,
}

impl TaskChoice {
    pub fn target(self) -> Screen {
        match self {
            Self::TextReading => Screen::TextReading,
            Self::ImageDescription => Screen::ImageDescription,
            Self::PhotoCapture => Screen::PhotoCapture,
            Self::History => Screen::TaskHistory,
        }
    }
}
