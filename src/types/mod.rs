//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Session types and their fixed durations
//! - Timer state snapshots emitted by the engine
//! - The unified engine event stream

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Work session length in seconds (25 minutes).
pub const WORK_SECONDS: u32 = 25 * 60;

/// Short break length in seconds (5 minutes).
pub const SHORT_BREAK_SECONDS: u32 = 5 * 60;

/// Long break length in seconds (15 minutes).
pub const LONG_BREAK_SECONDS: u32 = 15 * 60;

/// Number of completed work sessions that earns a long break.
pub const WORK_SESSIONS_PER_LONG_BREAK: u32 = 4;

// ============================================================================
// SessionType
// ============================================================================

/// The kind of interval currently being timed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Focused work
    #[default]
    Work,
    /// Short rest between work sessions
    ShortBreak,
    /// Long rest after a full set of work sessions
    LongBreak,
}

impl SessionType {
    /// All session types, in cycle order.
    pub const ALL: [SessionType; 3] = [
        SessionType::Work,
        SessionType::ShortBreak,
        SessionType::LongBreak,
    ];

    /// Returns the fixed default duration of this session type in seconds.
    pub const fn default_duration(self) -> u32 {
        match self {
            SessionType::Work => WORK_SECONDS,
            SessionType::ShortBreak => SHORT_BREAK_SECONDS,
            SessionType::LongBreak => LONG_BREAK_SECONDS,
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }

    /// Returns the string representation used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::ShortBreak => "short_break",
            SessionType::LongBreak => "long_break",
        }
    }

    /// Returns the display theme for this session type.
    pub fn theme(&self) -> Theme {
        match self {
            SessionType::Work => Theme::Work,
            SessionType::ShortBreak | SessionType::LongBreak => Theme::Break,
        }
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        !matches!(self, SessionType::Work)
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Visual theme a view applies for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Work sessions
    Work,
    /// Short and long breaks
    Break,
}

impl Theme {
    /// Returns the theme class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Work => "work-mode",
            Theme::Break => "break-mode",
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Immutable snapshot of the timer.
///
/// The engine never mutates a snapshot in place; every transition builds a
/// new value from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Seconds left in the current session
    pub time_remaining: u32,
    /// Current session type
    pub session_type: SessionType,
    /// Whether a countdown is in progress
    pub is_running: bool,
    /// Work sessions completed since the last long break (0-3)
    pub completed_work_sessions: u32,
}

impl TimerState {
    /// Creates the initial state: a paused, full-length work session.
    pub const fn initial() -> Self {
        Self::for_session(SessionType::Work, 0)
    }

    /// Creates a paused state at the full duration of `session_type`.
    pub const fn for_session(session_type: SessionType, completed_work_sessions: u32) -> Self {
        Self {
            time_remaining: session_type.default_duration(),
            session_type,
            is_running: false,
            completed_work_sessions,
        }
    }

    /// Returns a copy with the running flag set to `is_running`.
    #[must_use]
    pub fn with_running(self, is_running: bool) -> Self {
        Self { is_running, ..self }
    }

    /// Returns a copy with one second taken off, saturating at zero.
    #[must_use]
    pub fn decremented(self) -> Self {
        Self {
            time_remaining: self.time_remaining.saturating_sub(1),
            ..self
        }
    }

    /// Returns a copy restored to the full duration of the current session.
    #[must_use]
    pub fn restarted(self) -> Self {
        Self::for_session(self.session_type, self.completed_work_sessions)
    }

    /// Returns true if no time is left.
    pub fn is_expired(&self) -> bool {
        self.time_remaining == 0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::initial()
    }
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Ordered engine output, for observers that need to see snapshots and
/// session-end notifications interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "state", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A new snapshot replaced the previous one
    StateChanged(TimerState),
    /// A session ran to zero on its own
    SessionEnded,
}

// ============================================================================
// Tests
// ============================================================================
