use clap::{Parser, Subcommand, ValueEnum};
use sample_task_core::config::{ConfigOverrides, canonical_key};
use sample_task_core::model::TaskChoice;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sample_task",
    author,
    version,
    about = "Walk through the sample tasks from the terminal",
    long_about = "Starts an interactive session. Type one action per line; \
                  `help` lists the actions, `exit` ends the session."
)]
pub struct Cli {
    /// Print task history as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

/// One line typed into the interactive session.
#[derive(Parser, Debug)]
#[command(name = "sample_task", disable_version_flag = true)]
pub struct ActionLine {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Begin the sample task
    ///
    /// Example: start
    Start,
    /// Measure ambient noise; a quiet room unlocks task selection
    ///
    /// Example: noise-test
    #[command(name = "noise-test", alias = "test")]
    NoiseTest,
    /// Open a task or the task history
    ///
    /// Example: select text-reading
    Select {
        #[arg(value_enum)]
        choice: ChoiceArg,
    },
    /// Return to task selection without submitting
    Back,
    /// Start holding the record button
    Press,
    /// Release the record button
    Release,
    /// Hold the record button for a number of seconds
    ///
    /// Example: hold 15
    Hold { seconds: u64 },
    /// Capture a photo from an image file; without a path the capture is cancelled
    ///
    /// Example: capture ./desk.jpg
    Capture { path: Option<PathBuf> },
    /// Describe the captured photo
    ///
    /// Example: describe "a red mug on a desk"
    Describe {
        #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Submit the current task
    Submit,
    /// Show the current screen again
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceArg {
    TextReading,
    ImageDescription,
    PhotoCapture,
    History,
}

impl From<ChoiceArg> for TaskChoice {
    fn from(value: ChoiceArg) -> Self {
        match value {
            ChoiceArg::TextReading => TaskChoice::TextReading,
            ChoiceArg::ImageDescription => TaskChoice::ImageDescription,
            ChoiceArg::PhotoCapture => TaskChoice::PhotoCapture,
            ChoiceArg::History => TaskChoice::History,
        }
    }
}

/// Flag name used to identify config override arguments by the runtime.
pub const CONFIG_OVERRIDE_FLAG: &str = "--config-override";

/// Parse a raw `KEY=VALUE` override and store it in `overrides`.
pub fn apply_config_override(overrides: &mut ConfigOverrides, raw: &str) -> Result<(), String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let key = canonical_key(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;
    let value = value_raw.trim();

    match key.as_str() {
        "theme" => overrides.theme = Some(value.to_string()),
        "media_dir" => overrides.media_dir = Some(PathBuf::from(non_empty(&key, value)?)),
        "audio_dir" => overrides.audio_dir = Some(non_empty(&key, value)?.to_string()),
        "prompt_text" => overrides.prompt_text = Some(non_empty(&key, value)?.to_string()),
        "image_url" => overrides.image_url = Some(non_empty(&key, value)?.to_string()),
        "noise_seed" => overrides.noise_seed = Some(parse_number(&key, value)?),
        "fixed_noise_db" => overrides.fixed_noise_db = Some(parse_number(&key, value)?),
        "camera_allowed" => overrides.camera_allowed = Some(parse_bool(&key, value)?),
        other => return Err(format!("unknown config field '{other}'")),
    }

    Ok(())
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("{key} override cannot be empty"))
    } else {
        Ok(value)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{key} must be a non-negative integer"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("{key} must be true or false")),
    }
}
