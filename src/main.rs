//! Pomodoro Timer CLI
//!
//! Runs the timer in the terminal:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 work sessions

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tokio::runtime::Builder;

use pomodoro_timer::cli::{Cli, Commands, RunArgs};
use pomodoro_timer::config::{ConfigError, ViewConfig};
use pomodoro_timer::sound::{try_create_player, SoundPlayer};
use pomodoro_timer::view::{Display, TerminalView};
use pomodoro_timer::TimerEngine;

/// Main entry point
fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = block_on_execute(cli) {
        eprintln!("{}", Display::error_line(&format!("{:#}", e)));
        if let Some(hint) = error_hint(&e) {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}

/// Runs `execute` on a single-threaded runtime.
///
/// The runtime is shut down without waiting for blocking work: a stdin read
/// still pending after Ctrl-C can never complete on its own.
fn block_on_execute(cli: Cli) -> Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let result = runtime.block_on(execute(cli));
    runtime.shutdown_background();
    result
}

/// Returns the resolution hint for errors that carry one.
fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .downcast_ref::<ConfigError>()
        .map(ConfigError::suggestion)
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Commands::Run(args) => run(cli.config.as_deref(), &args).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// Runs the interactive timer on stdin/stdout.
async fn run(config_path: Option<&std::path::Path>, args: &RunArgs) -> Result<()> {
    let config = args.apply_to(ViewConfig::load(config_path).context("Failed to load config")?);
    tracing::debug!(?config, "Effective configuration");

    let player = if config.sound_enabled {
        try_create_player(false).map(|player| Box::new(player) as Box<dyn SoundPlayer>)
    } else {
        None
    };

    let engine = TimerEngine::on_current_runtime();
    let view = TerminalView::new(&config, player);

    if config.auto_start {
        engine.start();
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    // Ctrl-C is polled first so the handler is installed before any output
    tokio::select! {
        biased;

        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Interrupted");
        }
        reason = view.run(&engine, stdin, &mut stdout) => {
            let reason = reason?;
            tracing::info!(?reason, "Exiting");
        }
    }

    engine.pause();
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["pomodoro-timer"]);
        assert!(matches!(cli.command_or_default(), Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["pomodoro-timer", "run", "--start"]);
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.start),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_error_hint_for_config_error() {
        let error = Err::<(), _>(ConfigError::NotFound("/missing.json".into()))
            .context("Failed to load config")
            .unwrap_err();

        assert_eq!(error_hint(&error), Some("check the --config path"));
    }

    #[test]
    fn test_error_hint_absent_for_other_errors() {
        let error = anyhow::anyhow!("boom");
        assert_eq!(error_hint(&error), None);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
