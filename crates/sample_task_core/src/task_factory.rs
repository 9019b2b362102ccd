//! Builds task records from inputs the submitting screen has already checked.
//!
//! Every record starts with id `0`; the store assigns the real one on append.

use crate::clock::Clock;
use crate::model::{Task, TaskType};

pub fn text_reading(clock: &dyn Clock, prompt: &str, audio_path: &str, duration_sec: u32) -> Task {
    Task {
        id: 0,
        task_type: TaskType::TextReading,
        text: Some(prompt.to_string()),
        image_url: None,
        image_path: None,
        audio_path: Some(audio_path.to_string()),
        duration_sec,
        timestamp: clock.local_timestamp(),
    }
}

pub fn image_description(
    clock: &dyn Clock,
    image_url: &str,
    audio_path: &str,
    duration_sec: u32,
) -> Task {
    Task {
        id: 0,
        task_type: TaskType::ImageDescription,
        text: None,
        image_url: Some(image_url.to_string()),
        image_path: None,
        audio_path: Some(audio_path.to_string()),
        duration_sec,
        timestamp: clock.local_timestamp(),
    }
}

pub fn photo_capture(clock: &dyn Clock, text: &str, image_path: &str) -> Task {
    Task {
        id: 0,
        task_type: TaskType::PhotoCapture,
        text: Some(text.to_string()),
        image_url: None,
        image_path: Some(image_path.to_string()),
        audio_path: None,
        duration_sec: 0,
        timestamp: clock.local_timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::{image_description, photo_capture, text_reading};
    use crate::clock::ManualClock;
    use crate::model::TaskType;

    fn clock() -> ManualClock {
        ManualClock::starting_at("2025-03-01T10:00:00").unwrap()
    }

    #[test]
    fn text_reading_carries_prompt_and_audio() {
        let task = text_reading(
            &clock(),
            "Read this passage aloud in your native language.",
            "/local/audio_123.mp3",
            15,
        );

        assert_eq!(task.id, 0);
        assert_eq!(task.task_type, TaskType::TextReading);
        assert_eq!(
            task.text.as_deref(),
            Some("Read this passage aloud in your native language.")
        );
        assert_eq!(task.audio_path.as_deref(), Some("/local/audio_123.mp3"));
        assert_eq!(task.duration_sec, 15);
        assert_eq!(task.timestamp, "2025-03-01T10:00:00");
        assert!(task.image_url.is_none());
        assert!(task.image_path.is_none());
    }

    #[test]
    fn image_description_carries_url_instead_of_text() {
        let task = image_description(&clock(), "https://example.com/a.jpg", "/local/a.mp3", 12);

        assert_eq!(task.task_type, TaskType::ImageDescription);
        assert_eq!(task.image_url.as_deref(), Some("https://example.com/a.jpg"));
        assert!(task.text.is_none());
        assert_eq!(task.duration_sec, 12);
    }

    #[test]
    fn photo_capture_has_zero_duration_and_no_audio() {
        let task = photo_capture(&clock(), "a red mug", "/tmp/photo_1.jpg");

        assert_eq!(task.task_type, TaskType::PhotoCapture);
        assert_eq!(task.text.as_deref(), Some("a red mug"));
        assert_eq!(task.image_path.as_deref(), Some("/tmp/photo_1.jpg"));
        assert_eq!(task.duration_sec, 0);
        assert!(task.audio_path.is_none());
    }
}
