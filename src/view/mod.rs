//! Terminal view for the Pomodoro Timer.
//!
//! The view is the engine's only collaborator: it renders every snapshot,
//! turns input lines into engine operations, and plays the cue on each
//! session end.
//!
//! - `display`: time formatting and line rendering
//! - `controls`: command parsing

pub mod controls;
pub mod display;

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::engine::TimerEngine;
use crate::sound::{resolve_cue, SoundPlayer, SoundSource};
use crate::types::{TimerEvent, TimerState};

pub use controls::{Control, ControlParseError};
pub use display::Display;

/// Why `TerminalView::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed `quit`
    Quit,
    /// The input stream closed
    EndOfInput,
}

/// Renders engine output and forwards user commands.
pub struct TerminalView {
    player: Option<Box<dyn SoundPlayer>>,
    cue: SoundSource,
    json_output: bool,
}

impl TerminalView {
    /// Creates a view from the configuration.
    ///
    /// `player` is `None` when no audio device is available; the view then
    /// stays silent.
    pub fn new(config: &ViewConfig, player: Option<Box<dyn SoundPlayer>>) -> Self {
        if let Some(player) = &player {
            if config.sound_enabled {
                player.enable();
            } else {
                player.disable();
            }
        }

        Self {
            player,
            cue: resolve_cue(config.sound_file.as_deref()),
            json_output: config.json_output,
        }
    }

    /// Returns the cue played on session end.
    pub fn cue(&self) -> &SoundSource {
        &self.cue
    }

    /// Runs until the user quits or `input` closes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(
        &self,
        engine: &TimerEngine,
        input: R,
        output: &mut W,
    ) -> Result<ExitReason>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut events = engine.events();
        let mut lines = input.lines();
        let mut last_state = engine.state();

        self.render_state(&last_state, output)?;

        let reason = loop {
            tokio::select! {
                biased;

                Some(event) = events.recv() => {
                    if let TimerEvent::StateChanged(state) = event {
                        last_state = state;
                    }
                    self.handle_event(&event, &last_state, output)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break ExitReason::EndOfInput;
                    };
                    if let Some(reason) = self.handle_line(engine, &line, output)? {
                        break reason;
                    }
                }
            }
        };

        engine.unsubscribe(events.id());
        debug!(?reason, "View stopped");
        Ok(reason)
    }

    /// Renders one engine event and fires the cue on session end.
    ///
    /// `state` is the latest snapshot seen before the event.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn handle_event<W: Write>(
        &self,
        event: &TimerEvent,
        state: &TimerState,
        output: &mut W,
    ) -> Result<()> {
        match event {
            TimerEvent::StateChanged(state) => self.render_state(state, output)?,
            TimerEvent::SessionEnded => {
                if self.json_output {
                    self.write_json(event, output)?;
                } else {
                    writeln!(output, "{}", Display::session_ended_line(state))
                        .context("Failed to write output")?;
                }
                self.play_cue();
            }
        }
        output.flush().context("Failed to flush output")
    }

    fn handle_line<W: Write>(
        &self,
        engine: &TimerEngine,
        line: &str,
        output: &mut W,
    ) -> Result<Option<ExitReason>> {
        match line.parse::<Control>() {
            Ok(Control::Quit) => return Ok(Some(ExitReason::Quit)),
            Ok(Control::Help) => {
                writeln!(output, "{}", Display::help_text()).context("Failed to write output")?;
            }
            Ok(control) => {
                debug!(?control, "Command received");
                control.apply(engine);
            }
            Err(ControlParseError::Empty) => {}
            Err(e) => {
                writeln!(output, "{}", Display::error_line(&e.to_string()))
                    .context("Failed to write output")?;
            }
        }
        Ok(None)
    }

    fn render_state<W: Write>(&self, state: &TimerState, output: &mut W) -> Result<()> {
        if self.json_output {
            self.write_json(&TimerEvent::StateChanged(*state), output)
        } else {
            writeln!(output, "{}", Display::status_line(state)).context("Failed to write output")
        }
    }

    fn write_json<W: Write>(&self, event: &TimerEvent, output: &mut W) -> Result<()> {
        let line = Display::json_line(event).context("Failed to serialize event")?;
        writeln!(output, "{}", line).context("Failed to write output")
    }

    fn play_cue(&self) {
        let Some(player) = &self.player else {
            return;
        };
        if let Err(e) = player.play(&self.cue) {
            warn!("Failed to play session-end cue: {} ({})", e, e.suggestion());
        }
    }
}

impl std::fmt::Debug for TerminalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalView")
            .field("has_player", &self.player.is_some())
            .field("cue", &self.cue)
            .field("json_output", &self.json_output)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sound::MockSoundPlayer;
    use crate::types::SessionType;

    fn view_with_mock(config: &ViewConfig) -> (TerminalView, Arc<MockSoundPlayer>) {
        let mock = Arc::new(MockSoundPlayer::new());
        let view = TerminalView::new(config, Some(Box::new(Arc::clone(&mock))));
        (view, mock)
    }

    fn output_text(output: Vec<u8>) -> String {
        String::from_utf8(output).unwrap()
    }

    mod event_tests {
        use super::*;

        #[test]
        fn test_session_ended_plays_cue() {
            let (view, mock) = view_with_mock(&ViewConfig::default());
            let mut output = Vec::new();

            view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output)
                .unwrap();

            assert_eq!(mock.play_count(), 1);
            assert_eq!(mock.get_play_calls()[0], SoundSource::chime());
            assert_eq!(output_text(output), "* Work session complete\n");
        }

        #[test]
        fn test_each_session_end_replays_cue() {
            let (view, mock) = view_with_mock(&ViewConfig::default());
            let mut output = Vec::new();

            for _ in 0..3 {
                view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output)
                    .unwrap();
            }

            assert_eq!(mock.play_count(), 3);
        }

        #[test]
        fn test_sound_disabled_by_config() {
            let config = ViewConfig::default().with_no_sound(true);
            let (view, mock) = view_with_mock(&config);
            let mut output = Vec::new();

            view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output)
                .unwrap();

            assert!(mock.is_disabled());
            assert_eq!(mock.play_count(), 0);
        }

        #[test]
        fn test_playback_failure_is_not_fatal() {
            let (view, mock) = view_with_mock(&ViewConfig::default());
            mock.set_should_fail(true);
            let mut output = Vec::new();

            let result =
                view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output);

            assert!(result.is_ok());
        }

        #[test]
        fn test_no_player_is_silent() {
            let view = TerminalView::new(&ViewConfig::default(), None);
            let mut output = Vec::new();

            view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output)
                .unwrap();

            assert!(output_text(output).contains("session complete"));
        }

        #[test]
        fn test_state_changed_renders_status_line() {
            let (view, _mock) = view_with_mock(&ViewConfig::default());
            let state = TimerState::for_session(SessionType::ShortBreak, 1);
            let mut output = Vec::new();

            view.handle_event(&TimerEvent::StateChanged(state), &state, &mut output)
                .unwrap();

            assert_eq!(output_text(output), format!("{}\n", Display::status_line(&state)));
        }

        #[test]
        fn test_json_output() {
            let config = ViewConfig::default().with_json_output(true);
            let (view, _mock) = view_with_mock(&config);
            let mut output = Vec::new();

            view.handle_event(
                &TimerEvent::StateChanged(TimerState::initial()),
                &TimerState::initial(),
                &mut output,
            )
            .unwrap();
            view.handle_event(&TimerEvent::SessionEnded, &TimerState::initial(), &mut output)
                .unwrap();

            let text = output_text(output);
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].contains("\"timeRemaining\":1500"));
            assert_eq!(lines[1], r#"{"event":"session_ended"}"#);
        }
    }

    mod run_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_run_applies_commands_until_quit() {
            let engine = TimerEngine::on_current_runtime();
            let (view, _mock) = view_with_mock(&ViewConfig::default());
            let mut output = Vec::new();
            let input: &[u8] = b"long\nbogus\nhelp\nquit\nstart\n";

            let reason = view.run(&engine, input, &mut output).await.unwrap();

            assert_eq!(reason, ExitReason::Quit);
            assert_eq!(engine.state().session_type, SessionType::LongBreak);
            assert!(!engine.state().is_running, "commands after quit are ignored");

            let text = output_text(output);
            assert!(text.contains("error: unknown command 'bogus'"));
            assert!(text.contains("commands:"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_run_ends_with_input() {
            let engine = TimerEngine::on_current_runtime();
            let view = TerminalView::new(&ViewConfig::default(), None);
            let mut output = Vec::new();
            let input: &[u8] = b"";

            let reason = view.run(&engine, input, &mut output).await.unwrap();

            assert_eq!(reason, ExitReason::EndOfInput);
            assert!(output_text(output).contains("25:00"));
        }
    }
}
