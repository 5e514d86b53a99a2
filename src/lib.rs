//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer.
//! It includes:
//! - Timer engine: countdown state machine with auto-transition between
//!   work sessions, short breaks and long breaks
//! - Observable state holder with latest-value replay
//! - Terminal view that renders snapshots and forwards user commands
//! - Sound playback for the session-end cue
//! - CLI parsing and view configuration

pub mod cli;
pub mod config;
pub mod engine;
pub mod sound;
pub mod types;
pub mod view;

// Re-export commonly used types for convenience
pub use types::{SessionType, TimerEvent, TimerState};

pub use engine::{StateStore, Subscription, SubscriptionId, TimerEngine};

pub use config::{ConfigError, ViewConfig};

pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};

pub use view::{Control, Display, ExitReason, TerminalView};
