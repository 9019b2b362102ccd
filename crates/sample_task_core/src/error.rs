use crate::model::Screen;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    NoiseTooHigh { reading_db: u32 },
    RecordingTooShort { duration_sec: u32 },
    RecordingTooLong { duration_sec: u32 },
    MissingRequiredField(&'static str),
    InvalidTransition { screen: Screen, action: &'static str },
    InvalidInput(String),
    InvalidData(String),
    Io(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn invalid_transition(screen: Screen, action: &'static str) -> Self {
        Self::InvalidTransition { screen, action }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NoiseTooHigh { .. } => "noise_too_high",
            Self::RecordingTooShort { .. } => "recording_too_short",
            Self::RecordingTooLong { .. } => "recording_too_long",
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoiseTooHigh { .. } => "Please move to a quieter place".to_string(),
            Self::RecordingTooShort { .. } => "Recording too short (min 10s)".to_string(),
            Self::RecordingTooLong { .. } => "Recording too long (max 20s)".to_string(),
            Self::MissingRequiredField(field) => format!("{field} is required"),
            Self::InvalidTransition { screen, action } => {
                format!("'{action}' is not available on the {} screen", screen.label())
            }
            Self::InvalidInput(message) => message.clone(),
            Self::InvalidData(message) => message.clone(),
            Self::Io(message) => message.clone(),
        }
    }

    /// Validation failures are shown inline and never end the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::InvalidData(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
