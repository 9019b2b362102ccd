use crate::error::AppError;
use crate::model::Recording;
use tracing::{debug, info};

pub const MIN_RECORDING_SECS: u32 = 10;
pub const MAX_RECORDING_SECS: u32 = 20;

/// Press-and-hold audio capture, split into a press call and a release call.
///
/// Times are passed in as monotonic milliseconds so the caller decides which
/// clock drives the measurement.
#[derive(Debug, Clone)]
pub struct RecordingGate {
    audio_dir: String,
    started_at_ms: Option<u64>,
    message: Option<String>,
    last_stamp_ms: Option<u64>,
}

impl RecordingGate {
    pub fn new<D: Into<String>>(audio_dir: D) -> Self {
        Self {
            audio_dir: audio_dir.into(),
            started_at_ms: None,
            message: None,
            last_stamp_ms: None,
        }
    }

    /// Starts a fresh measurement, replacing any press still in flight.
    pub fn start_press(&mut self, now_ms: u64) {
        if self.started_at_ms.is_some() {
            debug!("press restarted before release");
        }
        self.started_at_ms = Some(now_ms);
        self.message = None;
    }

    /// Ends the hold. `stamp_ms` is the wall-clock time used to name the audio file.
    pub fn end_press(&mut self, now_ms: u64, stamp_ms: u64) -> Result<Recording, AppError> {
        let started_at_ms = self
            .started_at_ms
            .take()
            .ok_or_else(|| AppError::invalid_input("no recording in progress"))?;

        let elapsed_secs = now_ms.saturating_sub(started_at_ms) / 1000;
        let duration_sec = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);

        if duration_sec < MIN_RECORDING_SECS {
            return Err(self.reject(AppError::RecordingTooShort { duration_sec }));
        }
        if duration_sec > MAX_RECORDING_SECS {
            return Err(self.reject(AppError::RecordingTooLong { duration_sec }));
        }

        let stamp = self.unique_stamp(stamp_ms);
        let audio_path = format!(
            "{}/audio_{}.mp3",
            self.audio_dir.trim_end_matches('/'),
            stamp
        );
        info!(duration_sec, audio_path = %audio_path, "recording accepted");
        Ok(Recording {
            duration_sec,
            audio_path,
        })
    }

    /// Drops a press without evaluating it, e.g. when the user leaves the screen mid-hold.
    pub fn cancel(&mut self) {
        self.started_at_ms = None;
        self.message = None;
    }

    pub fn is_recording(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn reject(&mut self, err: AppError) -> AppError {
        info!(code = err.code(), "recording rejected");
        self.message = Some(err.message());
        err
    }

    fn unique_stamp(&mut self, stamp_ms: u64) -> u64 {
        let stamp = match self.last_stamp_ms {
            Some(last) if stamp_ms <= last => last + 1,
            _ => stamp_ms,
        };
        self.last_stamp_ms = Some(stamp);
        stamp
    }
}
