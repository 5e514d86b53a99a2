//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ViewConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - a terminal countdown for work and break sessions
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Terminal Pomodoro timer",
    long_about = "A Pomodoro timer for the terminal.\n\
                  Work for 25 minutes, take a 5 minute break, and a 15 minute break after every fourth work session.\n\
                  Type commands (start, pause, reset, work, short, long, quit) while it runs.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Returns the command to run, treating a bare invocation as `run`.
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Start the first work session immediately
    #[arg(short, long)]
    pub start: bool,

    /// Disable the session-end sound
    #[arg(long)]
    pub no_sound: bool,

    /// Audio file to play when a session ends
    #[arg(long, value_name = "PATH", value_parser = validate_sound_file)]
    pub sound_file: Option<PathBuf>,

    /// Print every snapshot as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Layers these flags over a loaded configuration.
    pub fn apply_to(&self, config: ViewConfig) -> ViewConfig {
        config
            .with_no_sound(self.no_sound)
            .with_sound_file(self.sound_file.clone())
            .with_json_output(self.json)
            .with_auto_start(self.start)
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the sound file argument.
///
/// Only rejects obviously wrong input; existence is checked when the cue is
/// resolved so a missing file degrades to the built-in chime.
fn validate_sound_file(s: &str) -> Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("sound file path cannot be empty".to_string());
    }
    Ok(PathBuf::from(s))
}

// ============================================================================
// Tests
// ============================================================================
