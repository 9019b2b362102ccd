use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::info;

const MEDIA_DIR_NAME: &str = "sample_task";

/// Writes captured photos into a local directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join(MEDIA_DIR_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `bytes` as `photo_<stamp_ms>.jpg`, skipping names that already exist.
    pub fn save_photo(&self, bytes: &[u8], stamp_ms: u64) -> Result<PathBuf, AppError> {
        if bytes.is_empty() {
            return Err(AppError::invalid_data("captured image is empty"));
        }

        std::fs::create_dir_all(&self.dir).map_err(|err| AppError::io(err.to_string()))?;

        let mut stamp = stamp_ms;
        let mut path = self.dir.join(format!("photo_{stamp}.jpg"));
        while path.exists() {
            stamp += 1;
            path = self.dir.join(format!("photo_{stamp}.jpg"));
        }

        std::fs::write(&path, bytes)
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        info!(path = %path.display(), bytes = bytes.len(), "photo saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::MediaStore;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("sample-task-{nanos}-{name}"))
    }

    #[test]
    fn save_photo_writes_bytes_under_dir() {
        let dir = temp_dir("media");
        let store = MediaStore::new(&dir);

        let path = store.save_photo(b"jpeg-bytes", 1_700_000_000_000).unwrap();

        assert_eq!(path, dir.join("photo_1700000000000.jpg"));
        assert_eq!(fs::read(&path).unwrap(), b"jpeg-bytes");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_photo_never_overwrites() {
        let dir = temp_dir("media-collision");
        let store = MediaStore::new(&dir);

        let first = store.save_photo(b"one", 5).unwrap();
        let second = store.save_photo(b"two", 5).unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert_eq!(fs::read(&second).unwrap(), b"two");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_photo_rejects_empty_capture() {
        let dir = temp_dir("media-empty");
        let err = MediaStore::new(&dir).save_photo(&[], 1).unwrap_err();

        assert_eq!(err.code(), "invalid_data");
        assert!(!dir.exists());
    }
}
