//! Sound source management.
//!
//! A cue is either an audio file on disk or a synthesized tone. The tone
//! needs no assets and is the fallback whenever a file cannot be played.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Frequency of the built-in session-end chime.
pub const CHIME_FREQUENCY_HZ: f32 = 880.0;

/// Length of the built-in session-end chime.
pub const CHIME_DURATION_MS: u64 = 400;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A sine tone generated at playback time.
    Tone {
        /// Display name.
        name: String,
        /// Pitch in hertz.
        frequency_hz: f32,
        /// Length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Creates a file source after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::Missing` or `SoundError::Unsupported`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomodoro_timer::sound::SoundSource;
    ///
    /// let source = SoundSource::file_validated("/nonexistent/cue.wav");
    /// assert!(source.is_err());
    /// ```
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        validate_sound_path(&path)?;
        Ok(Self::file(path))
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, frequency_hz: f32, duration_ms: u64) -> Self {
        Self::Tone {
            name: name.into(),
            frequency_hz,
            duration_ms,
        }
    }

    /// The built-in session-end chime.
    #[must_use]
    pub fn chime() -> Self {
        Self::tone("chime", CHIME_FREQUENCY_HZ, CHIME_DURATION_MS)
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::chime()
    }
}

fn validate_sound_path(path: &Path) -> Result<(), SoundError> {
    let supported = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(SoundError::Unsupported(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(SoundError::Missing(path.to_path_buf()));
    }

    Ok(())
}

/// Resolves the cue to play: the configured file when it is usable,
/// otherwise the chime.
#[must_use]
pub fn resolve_cue(configured: Option<&Path>) -> SoundSource {
    match configured {
        Some(path) => match SoundSource::file_validated(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Ignoring sound file: {}; using the built-in chime", e);
                SoundSource::chime()
            }
        },
        None => SoundSource::chime(),
    }
}
