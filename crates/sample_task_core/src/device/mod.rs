use crate::error::AppError;
use std::path::PathBuf;

/// Produces one still image per call, or `None` when the user backs out.
pub trait Camera {
    fn capture(&mut self) -> Result<Option<Vec<u8>>, AppError>;
}

/// Platform permission check consulted before every capture.
pub trait PermissionGate {
    fn camera_granted(&mut self) -> bool;
}

pub struct NoCamera;

impl Camera for NoCamera {
    fn capture(&mut self) -> Result<Option<Vec<u8>>, AppError> {
        Ok(None)
    }
}

/// Camera backed by an image file on disk. No source path means the capture was cancelled.
pub struct FileCamera {
    source: Option<PathBuf>,
}

impl FileCamera {
    pub fn new(source: Option<PathBuf>) -> Self {
        Self { source }
    }
}

impl Camera for FileCamera {
    fn capture(&mut self) -> Result<Option<Vec<u8>>, AppError> {
        let Some(path) = self.source.take() else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
        Ok(Some(bytes))
    }
}

/// Fixed answer, typically taken from configuration.
pub struct StaticPermission(pub bool);

impl PermissionGate for StaticPermission {
    fn camera_granted(&mut self) -> bool {
        self.0
    }
}
