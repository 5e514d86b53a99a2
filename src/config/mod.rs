//! View configuration.
//!
//! Settings live in a JSON file, by default
//! `<config dir>/pomodoro-timer/config.json`. Every field is optional; a
//! missing default file simply yields the defaults. Session durations are
//! fixed and deliberately absent here.

mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "pomodoro-timer";

/// Config file name inside `APP_DIR_NAME`.
pub const CONFIG_FILE_NAME: &str = "config.json";

fn default_sound_enabled() -> bool {
    true
}

/// Settings for the terminal view.
///
/// # Example
///
/// ```
/// use pomodoro_timer::config::ViewConfig;
///
/// let config = ViewConfig::default();
/// assert!(config.sound_enabled);
/// assert!(!config.json_output);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// Play a cue when a session ends.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Audio file to use instead of the built-in chime.
    #[serde(default)]
    pub sound_file: Option<PathBuf>,

    /// Print snapshots as JSON lines instead of the status line.
    #[serde(default)]
    pub json_output: bool,

    /// Start the first work session right after launch.
    #[serde(default)]
    pub auto_start: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sound_enabled: default_sound_enabled(),
            sound_file: None,
            json_output: false,
            auto_start: false,
        }
    }
}

impl ViewConfig {
    /// Returns the default config file location, if the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration.
    ///
    /// With an explicit path the file must exist. Without one the default
    /// location is tried and a missing file means defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Turns the cue off when `no_sound` is set.
    #[must_use]
    pub fn with_no_sound(mut self, no_sound: bool) -> Self {
        if no_sound {
            self.sound_enabled = false;
        }
        self
    }

    /// Replaces the cue file when one is given.
    #[must_use]
    pub fn with_sound_file(mut self, sound_file: Option<PathBuf>) -> Self {
        if sound_file.is_some() {
            self.sound_file = sound_file;
        }
        self
    }

    /// Enables JSON output when `json` is set.
    #[must_use]
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output |= json;
        self
    }

    /// Enables auto-start when `start` is set.
    #[must_use]
    pub fn with_auto_start(mut self, start: bool) -> Self {
        self.auto_start |= start;
        self
    }
}
