//! User commands for the terminal view.

use std::str::FromStr;

use thiserror::Error;

use crate::engine::TimerEngine;
use crate::types::SessionType;

/// A command typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Reset,
    /// Manual session override
    Session(SessionType),
    Help,
    Quit,
}

/// Input that is not a known command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
}

impl FromStr for Control {
    type Err = ControlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();
        let control = match word.as_str() {
            "" => return Err(ControlParseError::Empty),
            "start" | "s" => Control::Start,
            "pause" | "p" => Control::Pause,
            "reset" | "r" => Control::Reset,
            "work" | "w" => Control::Session(SessionType::Work),
            "short" | "sb" => Control::Session(SessionType::ShortBreak),
            "long" | "lb" => Control::Session(SessionType::LongBreak),
            "help" | "h" | "?" => Control::Help,
            "quit" | "q" | "exit" => Control::Quit,
            _ => return Err(ControlParseError::Unknown(s.trim().to_string())),
        };
        Ok(control)
    }
}

impl Control {
    /// Forwards the command to the engine.
    ///
    /// Returns false for commands the engine does not handle.
    pub fn apply(self, engine: &TimerEngine) -> bool {
        match self {
            Control::Start => engine.start(),
            Control::Pause => engine.pause(),
            Control::Reset => engine.reset(),
            Control::Session(session_type) => engine.set_session(session_type),
            Control::Help | Control::Quit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_long_names() {
            assert_eq!("start".parse(), Ok(Control::Start));
            assert_eq!("pause".parse(), Ok(Control::Pause));
            assert_eq!("reset".parse(), Ok(Control::Reset));
            assert_eq!("work".parse(), Ok(Control::Session(SessionType::Work)));
            assert_eq!("short".parse(), Ok(Control::Session(SessionType::ShortBreak)));
            assert_eq!("long".parse(), Ok(Control::Session(SessionType::LongBreak)));
            assert_eq!("help".parse(), Ok(Control::Help));
            assert_eq!("quit".parse(), Ok(Control::Quit));
        }

        #[test]
        fn test_parse_aliases() {
            assert_eq!("s".parse(), Ok(Control::Start));
            assert_eq!("p".parse(), Ok(Control::Pause));
            assert_eq!("r".parse(), Ok(Control::Reset));
            assert_eq!("sb".parse(), Ok(Control::Session(SessionType::ShortBreak)));
            assert_eq!("lb".parse(), Ok(Control::Session(SessionType::LongBreak)));
            assert_eq!("?".parse(), Ok(Control::Help));
            assert_eq!("exit".parse(), Ok(Control::Quit));
        }

        #[test]
        fn test_parse_ignores_case_and_whitespace() {
            assert_eq!("  START \n".parse(), Ok(Control::Start));
            assert_eq!("Long".parse(), Ok(Control::Session(SessionType::LongBreak)));
        }

        #[test]
        fn test_parse_empty() {
            assert_eq!("   ".parse::<Control>(), Err(ControlParseError::Empty));
        }

        #[test]
        fn test_parse_unknown() {
            let err = " snooze ".parse::<Control>().unwrap_err();
            assert_eq!(err, ControlParseError::Unknown("snooze".to_string()));
            assert!(err.to_string().contains("'snooze'"));
        }
    }

    mod apply_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_apply_forwards_to_engine() {
            let engine = TimerEngine::on_current_runtime();

            assert!(Control::Start.apply(&engine));
            assert!(engine.state().is_running);

            assert!(Control::Pause.apply(&engine));
            assert!(!engine.state().is_running);

            assert!(Control::Session(SessionType::LongBreak).apply(&engine));
            assert_eq!(engine.state().time_remaining, 900);

            assert!(Control::Reset.apply(&engine));
            assert_eq!(engine.state().session_type, SessionType::LongBreak);
        }

        #[tokio::test(start_paused = true)]
        async fn test_help_and_quit_leave_engine_alone() {
            let engine = TimerEngine::on_current_runtime();
            let mut sub = engine.subscribe();
            let _ = sub.drain();

            assert!(!Control::Help.apply(&engine));
            assert!(!Control::Quit.apply(&engine));
            assert!(sub.try_recv().is_none());
        }
    }
}
