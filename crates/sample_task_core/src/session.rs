//! The navigation controller.
//!
//! A [`Session`] owns everything that lives from app start to exit: the
//! current screen, both gates, the transient form of the open task screen
//! and the task store. Every user action is one method call; actions that
//! do not apply to the current screen fail with
//! [`AppError::InvalidTransition`] and change nothing.

use crate::clock::{Clock, SystemClock};
use crate::config::SessionSettings;
use crate::device::{Camera, PermissionGate};
use crate::error::AppError;
use crate::gates::{NoiseGate, NoiseSource, RandomNoiseSource, RecordingGate, ScriptedNoiseSource};
use crate::model::{HistorySummary, Recording, Screen, Task, TaskChoice};
use crate::storage::{MediaStore, TaskStore};
use crate::task_factory;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Input collected on the open task screen. Reset whenever a task screen is entered or left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub recording: Option<Recording>,
    pub photo_path: Option<PathBuf>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved(PathBuf),
    Cancelled,
    PermissionDenied,
}

pub struct Session {
    screen: Screen,
    store: TaskStore,
    noise_gate: NoiseGate,
    recording_gate: RecordingGate,
    media: MediaStore,
    clock: Box<dyn Clock>,
    form: TaskForm,
    prompt_text: String,
    image_url: String,
}

pub fn noise_source_for(settings: &SessionSettings) -> Box<dyn NoiseSource> {
    match (settings.fixed_noise_db, settings.noise_seed) {
        (Some(reading_db), _) => Box::new(ScriptedNoiseSource::constant(reading_db)),
        (None, Some(seed)) => Box::new(RandomNoiseSource::seeded(seed)),
        (None, None) => Box::new(RandomNoiseSource::from_entropy()),
    }
}

impl Session {
    pub fn new(
        settings: &SessionSettings,
        clock: Box<dyn Clock>,
        noise: Box<dyn NoiseSource>,
    ) -> Self {
        Self {
            screen: Screen::Start,
            store: TaskStore::new(),
            noise_gate: NoiseGate::new(noise),
            recording_gate: RecordingGate::new(settings.audio_dir.clone()),
            media: MediaStore::new(settings.media_dir.clone()),
            clock,
            form: TaskForm::default(),
            prompt_text: settings.prompt_text.clone(),
            image_url: settings.image_url.clone(),
        }
    }

    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(
            settings,
            Box::new(SystemClock::new()),
            noise_source_for(settings),
        )
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.all()
    }

    pub fn summary(&self) -> HistorySummary {
        self.store.summary()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn noise_gate(&self) -> &NoiseGate {
        &self.noise_gate
    }

    pub fn recording_gate(&self) -> &RecordingGate {
        &self.recording_gate
    }

    pub fn media_dir(&self) -> &Path {
        self.media.dir()
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn start(&mut self) -> Result<Screen, AppError> {
        self.expect_screen(&[Screen::Start], "start")?;
        Ok(self.move_to(Screen::NoiseTest))
    }

    /// Runs the noise test; only a passing reading leaves the noise screen.
    pub fn run_noise_test(&mut self) -> Result<Screen, AppError> {
        self.expect_screen(&[Screen::NoiseTest], "noise test")?;
        self.noise_gate.run_test()?;
        Ok(self.move_to(Screen::TaskSelection))
    }

    pub fn select(&mut self, choice: TaskChoice) -> Result<Screen, AppError> {
        self.expect_screen(&[Screen::TaskSelection], "select")?;
        Ok(self.move_to(choice.target()))
    }

    /// Leaves a task or history screen without recording anything.
    pub fn back(&mut self) -> Result<Screen, AppError> {
        self.expect_screen(
            &[
                Screen::TextReading,
                Screen::ImageDescription,
                Screen::PhotoCapture,
                Screen::TaskHistory,
            ],
            "back",
        )?;
        Ok(self.move_to(Screen::TaskSelection))
    }

    pub fn press_start(&mut self) -> Result<(), AppError> {
        self.expect_audio_screen("press")?;
        self.form.recording = None;
        self.recording_gate.start_press(self.clock.monotonic_millis());
        debug!(screen = ?self.screen, "recording started");
        Ok(())
    }

    pub fn press_end(&mut self) -> Result<Recording, AppError> {
        self.expect_audio_screen("release")?;
        let now_ms = self.clock.monotonic_millis();
        self.finish_press(now_ms)
    }

    /// Press and release with `hold` between them, without waiting in real time.
    pub fn record_hold(&mut self, hold: Duration) -> Result<Recording, AppError> {
        self.press_start()?;
        let hold_ms = u64::try_from(hold.as_millis()).unwrap_or(u64::MAX);
        let released_at = self.clock.monotonic_millis().saturating_add(hold_ms);
        self.finish_press(released_at)
    }

    pub fn capture_photo(
        &mut self,
        permission: &mut dyn PermissionGate,
        camera: &mut dyn Camera,
    ) -> Result<CaptureOutcome, AppError> {
        self.expect_screen(&[Screen::PhotoCapture], "capture")?;

        if !permission.camera_granted() {
            info!("camera permission denied");
            return Ok(CaptureOutcome::PermissionDenied);
        }

        let Some(bytes) = camera.capture()? else {
            debug!("capture cancelled");
            return Ok(CaptureOutcome::Cancelled);
        };

        let path = self.media.save_photo(&bytes, self.clock.unix_millis())?;
        self.form.photo_path = Some(path.clone());
        Ok(CaptureOutcome::Saved(path))
    }

    pub fn set_description(&mut self, text: &str) -> Result<(), AppError> {
        self.expect_screen(&[Screen::PhotoCapture], "describe")?;
        self.form.description = text.to_string();
        Ok(())
    }

    /// Whether the submit action is currently available.
    pub fn can_submit(&self) -> bool {
        self.screen.is_task_screen() && self.missing_field().is_none()
    }

    /// First required input still missing on the current task screen.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self.screen {
            Screen::TextReading | Screen::ImageDescription => {
                self.form.recording.is_none().then_some("recording")
            }
            Screen::PhotoCapture => {
                if self.form.photo_path.is_none() {
                    Some("photo")
                } else if self.form.description.is_empty() {
                    Some("description")
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Records the open task and returns to task selection. Returns the new task id.
    pub fn submit(&mut self) -> Result<u64, AppError> {
        if !self.screen.is_task_screen() {
            return Err(AppError::invalid_transition(self.screen, "submit"));
        }
        if let Some(field) = self.missing_field() {
            return Err(AppError::MissingRequiredField(field));
        }

        let task = self.build_task()?;
        let id = self.store.append(task);
        self.move_to(Screen::TaskSelection);
        Ok(id)
    }

    fn build_task(&self) -> Result<Task, AppError> {
        let clock = self.clock.as_ref();
        match (self.screen, &self.form) {
            (
                Screen::TextReading,
                TaskForm {
                    recording: Some(recording),
                    ..
                },
            ) => Ok(task_factory::text_reading(
                clock,
                &self.prompt_text,
                &recording.audio_path,
                recording.duration_sec,
            )),
            (
                Screen::ImageDescription,
                TaskForm {
                    recording: Some(recording),
                    ..
                },
            ) => Ok(task_factory::image_description(
                clock,
                &self.image_url,
                &recording.audio_path,
                recording.duration_sec,
            )),
            (
                Screen::PhotoCapture,
                TaskForm {
                    photo_path: Some(path),
                    description,
                    ..
                },
            ) => Ok(task_factory::photo_capture(
                clock,
                description,
                &path.to_string_lossy(),
            )),
            (screen, _) => Err(AppError::invalid_transition(screen, "submit")),
        }
    }

    fn finish_press(&mut self, now_ms: u64) -> Result<Recording, AppError> {
        let stamp_ms = self.clock.unix_millis();
        match self.recording_gate.end_press(now_ms, stamp_ms) {
            Ok(recording) => {
                self.form.recording = Some(recording.clone());
                Ok(recording)
            }
            Err(err) => {
                self.form.recording = None;
                Err(err)
            }
        }
    }

    fn expect_screen(&self, allowed: &[Screen], action: &'static str) -> Result<(), AppError> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(self.screen, action))
        }
    }

    fn expect_audio_screen(&self, action: &'static str) -> Result<(), AppError> {
        self.expect_screen(&[Screen::TextReading, Screen::ImageDescription], action)
    }

    fn move_to(&mut self, next: Screen) -> Screen {
        info!(from = ?self.screen, to = ?next, "screen transition");
        if self.screen.is_task_screen() || next.is_task_screen() {
            self.form = TaskForm::default();
            self.recording_gate.cancel();
        }
        self.screen = next;
        next
    }
}
