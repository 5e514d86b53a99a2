//! Errors raised while preparing or playing the session-end cue.
//!
//! None of these stop the timer; callers log them and carry on.

use std::io;
use std::path::PathBuf;

use rodio::decoder::DecoderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoundError {
    /// No output device could be opened.
    #[error("no audio output device: {0}")]
    NoDevice(String),

    #[error("cue file {} does not exist", .0.display())]
    Missing(PathBuf),

    /// Extension outside wav, mp3, flac and ogg.
    #[error("cue file {} has an unsupported format", .0.display())]
    Unsupported(PathBuf),

    #[error("cannot open cue file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode cue file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },

    /// The device accepted no new sink.
    #[error("audio output failed: {0}")]
    Output(String),
}

impl SoundError {
    /// Returns true when the cue file is at fault and the chime can play
    /// instead.
    #[must_use]
    pub fn falls_back_to_chime(&self) -> bool {
        matches!(
            self,
            Self::Missing(_) | Self::Unsupported(_) | Self::Open { .. } | Self::Decode { .. }
        )
    }

    /// Returns a short hint for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoDevice(_) => "connect an audio output device or pass --no-sound",
            Self::Missing(_) | Self::Open { .. } => "check the sound_file setting",
            Self::Unsupported(_) => "use a wav, mp3, flac or ogg file",
            Self::Decode { .. } => "the cue file may be corrupted",
            Self::Output(_) => "check the system audio settings",
        }
    }
}
