use crate::error::AppError;
use crate::storage::MediaStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "SAMPLE_TASK_CONFIG_PATH";

pub const DEFAULT_AUDIO_DIR: &str = "/local";
pub const DEFAULT_PROMPT_TEXT: &str = "Read this passage aloud in your native language.";
pub const DEFAULT_IMAGE_URL: &str = "https://cdn.dummyjson.com/product-images/14/2.jpg";

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        Some("solarized") => Palette {
            accent: "\x1b[38;5;108m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let cleaned = canonical_key(raw);
    match cleaned.as_deref() {
        None | Some("vanilla") | Some("light") => Some("default".to_string()),
        Some("dark") | Some("dark_mode") | Some("darkmode") => Some("noir".to_string()),
        Some(other) => Some(other.to_string()),
    }
}

/// Lowercases and collapses every run of non-alphanumerics into one underscore.
pub fn canonical_key(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub media_dir: Option<PathBuf>,
    #[serde(default)]
    pub audio_dir: Option<String>,
    #[serde(default)]
    pub prompt_text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub noise_seed: Option<u64>,
    #[serde(default)]
    pub fixed_noise_db: Option<u32>,
    #[serde(default)]
    pub camera_allowed: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub type ConfigOverrides = Config;

/// Everything a session needs, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub media_dir: PathBuf,
    pub audio_dir: String,
    pub prompt_text: String,
    pub image_url: String,
    pub noise_seed: Option<u64>,
    pub fixed_noise_db: Option<u32>,
    pub camera_allowed: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            media_dir: config
                .media_dir
                .clone()
                .unwrap_or_else(MediaStore::default_dir),
            audio_dir: non_blank(config.audio_dir.as_deref())
                .unwrap_or(DEFAULT_AUDIO_DIR)
                .to_string(),
            prompt_text: non_blank(config.prompt_text.as_deref())
                .unwrap_or(DEFAULT_PROMPT_TEXT)
                .to_string(),
            image_url: non_blank(config.image_url.as_deref())
                .unwrap_or(DEFAULT_IMAGE_URL)
                .to_string(),
            noise_seed: config.noise_seed,
            fixed_noise_db: config.fixed_noise_db,
            camera_allowed: config.camera_allowed.unwrap_or(true),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("sample_task")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("sample_task")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        merged.theme = canonical_theme_name(theme);
    }
    if overrides.media_dir.is_some() {
        merged.media_dir = overrides.media_dir.clone();
    }
    if overrides.audio_dir.is_some() {
        merged.audio_dir = overrides.audio_dir.clone();
    }
    if overrides.prompt_text.is_some() {
        merged.prompt_text = overrides.prompt_text.clone();
    }
    if overrides.image_url.is_some() {
        merged.image_url = overrides.image_url.clone();
    }
    if overrides.noise_seed.is_some() {
        merged.noise_seed = overrides.noise_seed;
    }
    if overrides.fixed_noise_db.is_some() {
        merged.fixed_noise_db = overrides.fixed_noise_db;
    }
    if overrides.camera_allowed.is_some() {
        merged.camera_allowed = overrides.camera_allowed;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, DEFAULT_AUDIO_DIR, DEFAULT_IMAGE_URL, DEFAULT_PROMPT_TEXT,
        SessionSettings, canonical_key, canonical_theme_name, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides, palette_for_theme,
    };
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("sample-task-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.map(|err| err.code()), Some("invalid_data"));
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "theme": "Dark Mode",
            "audio_dir": "/sdcard/audio",
            "noise_seed": 9,
            "camera_allowed": false
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.theme.as_deref(), Some("noir"));
        assert_eq!(loaded.audio_dir.as_deref(), Some("/sdcard/audio"));
        assert_eq!(loaded.noise_seed, Some(9));
        assert_eq!(loaded.camera_allowed, Some(false));
        assert_eq!(loaded.fixed_noise_db, None);
    }

    #[test]
    fn merge_overrides_replaces_only_given_fields() {
        let base = Config {
            theme: Some("solarized".into()),
            audio_dir: Some("/base".into()),
            noise_seed: Some(1),
            ..Config::default()
        };
        let overrides = ConfigOverrides {
            theme: Some("dark".into()),
            fixed_noise_db: Some(30),
            ..Config::default()
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(merged.theme.as_deref(), Some("noir"));
        assert_eq!(merged.audio_dir.as_deref(), Some("/base"));
        assert_eq!(merged.noise_seed, Some(1));
        assert_eq!(merged.fixed_noise_db, Some(30));
        assert_eq!(base.fixed_noise_db, None);
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            prompt_text: Some("Read slowly.".into()),
            ..Config::default()
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn settings_fill_defaults_and_ignore_blank_values() {
        let settings = SessionSettings::from_config(&Config {
            prompt_text: Some("   ".into()),
            ..Config::default()
        });

        assert_eq!(settings.audio_dir, DEFAULT_AUDIO_DIR);
        assert_eq!(settings.prompt_text, DEFAULT_PROMPT_TEXT);
        assert_eq!(settings.image_url, DEFAULT_IMAGE_URL);
        assert!(settings.camera_allowed);
        assert!(settings.noise_seed.is_none());
    }

    #[test]
    fn canonical_names_map_variants() {
        assert_eq!(canonical_theme_name("Vanilla"), Some("default".into()));
        assert_eq!(canonical_theme_name("dark-mode"), Some("noir".into()));
        assert_eq!(canonical_theme_name("  "), Some("default".into()));
        assert_eq!(canonical_key("Fixed-Noise DB"), Some("fixed_noise_db".into()));
        assert_eq!(canonical_key("--"), None);
    }

    #[test]
    fn palette_for_theme_returns_palette() {
        assert!(palette_for_theme(Some("vanilla")).accent.is_empty());
        assert_eq!(palette_for_theme(Some("noir")).accent, "\x1b[38;5;208m");
        assert!(palette_for_theme(Some("oceanic")).accent.is_empty());
        assert!(palette_for_theme(None).accent.is_empty());
    }
}
