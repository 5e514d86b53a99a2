//! Sound player implementation using rodio.
//!
//! Every `play` call creates a fresh sink, so a cue always starts from its
//! beginning even if the previous one is still audible.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, CHIME_DURATION_MS, CHIME_FREQUENCY_HZ};

/// Output gain for synthesized tones.
const TONE_AMPLITUDE: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NoDevice` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::NoDevice(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to the chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.falls_back_to_chime() => {
                        warn!("Failed to play '{}': {}, falling back to chime", name, e);
                        self.play_tone(CHIME_FREQUENCY_HZ, CHIME_DURATION_MS)
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Tone {
                name,
                frequency_hz,
                duration_ms,
            } => {
                debug!("Playing tone: {}", name);
                self.play_tone(*frequency_hz, *duration_ms)
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path).map_err(|source| SoundError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SoundError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();
        Ok(())
    }

    fn play_tone(&self, frequency_hz: f32, duration_ms: u64) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz)
            .take_duration(Duration::from_millis(duration_ms))
            .amplify(TONE_AMPLITUDE);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::Output(e.to_string()))
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests return early on machines without an audio device.

    #[test]
    fn test_disabled_player_skips_playback() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(player.is_disabled());
        assert!(player.play(&SoundSource::chime()).is_ok());
    }

    #[test]
    fn test_enable_disable() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        player.enable();
        assert!(!player.is_disabled());

        player.disable();
        assert!(player.is_disabled());
    }

    #[test]
    fn test_try_create_player_does_not_panic() {
        let _ = try_create_player(true);
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioSoundPlayer"));
    }

    #[test]
    fn test_play_missing_file_falls_back() {
        let player = match RodioSoundPlayer::new(false) {
            Ok(p) => p,
            Err(_) => return,
        };

        let source = SoundSource::file("/nonexistent/path/to/cue.wav");
        let _ = player.play(&source);
    }
}
