//! Display utilities for the terminal view.
//!
//! This module provides formatted output for:
//! - The `MM:SS` countdown
//! - Status lines for each snapshot
//! - JSON lines for machine consumers
//! - Help and error messages

use crate::types::{TimerEvent, TimerState, WORK_SESSIONS_PER_LONG_BREAK};

// ============================================================================
// Display
// ============================================================================

/// Text rendering for the terminal view.
pub struct Display;

impl Display {
    /// Formats seconds as zero-padded `MM:SS`.
    pub fn format_time(total_seconds: u32) -> String {
        let (minutes, seconds) = Self::split_time(total_seconds);
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Renders one status line for a snapshot.
    pub fn status_line(state: &TimerState) -> String {
        let marker = if state.is_running { ">" } else { "||" };
        format!(
            "[{}] {:<11} {} {} | work sessions {}/{}",
            state.session_type.theme().class_name(),
            state.session_type.label(),
            Self::format_time(state.time_remaining),
            marker,
            state.completed_work_sessions,
            WORK_SESSIONS_PER_LONG_BREAK,
        )
    }

    /// Line shown when a session runs out.
    pub fn session_ended_line(state: &TimerState) -> String {
        format!("* {} session complete", state.session_type.label())
    }

    /// Renders an event as a single JSON line.
    pub fn json_line(event: &TimerEvent) -> Result<String, serde_json::Error> {
        serde_json::to_string(event)
    }

    /// Command summary shown for `help`.
    pub fn help_text() -> &'static str {
        "commands:\n\
         \x20 start (s)   start or resume the countdown\n\
         \x20 pause (p)   pause the countdown\n\
         \x20 reset (r)   restart the current session\n\
         \x20 work  (w)   switch to a work session\n\
         \x20 short (sb)  switch to a short break\n\
         \x20 long  (lb)  switch to a long break\n\
         \x20 help  (h)   show this list\n\
         \x20 quit  (q)   exit"
    }

    /// Formats an error message for the user.
    pub fn error_line(message: &str) -> String {
        format!("error: {}", message)
    }

    /// Splits seconds into (minutes, seconds).
    fn split_time(total_seconds: u32) -> (u32, u32) {
        (total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionType;

    // ------------------------------------------------------------------------
    // Format Time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(Display::format_time(0), "00:00");
        }

        #[test]
        fn test_format_time_seconds_only() {
            assert_eq!(Display::format_time(45), "00:45");
        }

        #[test]
        fn test_format_time_one_minute() {
            assert_eq!(Display::format_time(60), "01:00");
        }

        #[test]
        fn test_format_time_mixed() {
            assert_eq!(Display::format_time(90), "01:30");
            assert_eq!(Display::format_time(700), "11:40");
        }

        #[test]
        fn test_format_time_session_defaults() {
            assert_eq!(Display::format_time(1500), "25:00");
            assert_eq!(Display::format_time(300), "05:00");
            assert_eq!(Display::format_time(900), "15:00");
        }

        #[test]
        fn test_format_time_last_second() {
            assert_eq!(Display::format_time(1499), "24:59");
        }
    }

    // ------------------------------------------------------------------------
    // Line Rendering Tests
    // ------------------------------------------------------------------------

    mod render_tests {
        use super::*;

        #[test]
        fn test_status_line_initial() {
            let line = Display::status_line(&TimerState::initial());

            assert!(line.starts_with("[work-mode] Work"));
            assert!(line.contains("25:00 ||"));
            assert!(line.ends_with("work sessions 0/4"));
        }

        #[test]
        fn test_status_line_running_break() {
            let state = TimerState {
                time_remaining: 299,
                session_type: SessionType::ShortBreak,
                is_running: true,
                completed_work_sessions: 2,
            };

            let line = Display::status_line(&state);

            assert!(line.starts_with("[break-mode] Short Break"));
            assert!(line.contains("04:59 >"));
            assert!(line.ends_with("work sessions 2/4"));
        }

        #[test]
        fn test_session_ended_line() {
            let state = TimerState {
                time_remaining: 0,
                ..TimerState::initial()
            };
            assert_eq!(Display::session_ended_line(&state), "* Work session complete");
        }

        #[test]
        fn test_json_line() {
            let line = Display::json_line(&TimerEvent::SessionEnded).unwrap();
            assert_eq!(line, r#"{"event":"session_ended"}"#);
        }

        #[test]
        fn test_help_lists_every_command() {
            let help = Display::help_text();
            for word in ["start", "pause", "reset", "work", "short", "long", "quit"] {
                assert!(help.contains(word), "help is missing {}", word);
            }
        }

        #[test]
        fn test_error_line() {
            assert_eq!(Display::error_line("bad"), "error: bad");
        }
    }
}
