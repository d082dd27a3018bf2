//! Interactive walkthrough command (the default when no subcommand is given).

use crate::CliOutput;
use crate::error::CliError;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepdoc_adapters::{LocalFileSystem, StdioOperator, TracingLogger};
use stepdoc_app::{RunSessionDeps, RunSessionInput, SessionOutcome, run_session};
use stepdoc_config::{ConfigOverrides, ValidatedConfig, load_config_std_env};
use stepdoc_ports::LoggerPort;

/// Flags that pre-answer the interactive prompts.
#[derive(Debug, Default, Args)]
pub struct SessionArgs {
    /// Root directory to walk (skips the directory prompt).
    #[arg(long)]
    pub root: Option<String>,
    /// Item identifier naming the output file (skips the item prompt).
    #[arg(long)]
    pub item: Option<String>,
    /// Continue without asking for confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Load the effective config, honoring `--output-dir`.
pub fn load_config(
    config_path: Option<&Path>,
    output_dir: Option<&Path>,
) -> Result<ValidatedConfig, CliError> {
    let overrides = ConfigOverrides {
        output_directory: output_dir.map(|dir| dir.to_string_lossy().into_owned().into_boxed_str()),
    };
    Ok(load_config_std_env(config_path, &overrides)?)
}

/// Run one walkthrough session on the terminal.
pub fn run_walkthrough(
    args: &SessionArgs,
    config_path: Option<&Path>,
    output_dir: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let config = load_config(config_path, output_dir)?;
    let cwd = std::env::current_dir()?;
    let input = session_input(args, &config, cwd);

    let logger: Arc<dyn LoggerPort> = Arc::new(TracingLogger::new());
    let deps = RunSessionDeps {
        filesystem: Arc::new(LocalFileSystem::new(config.scan.max_file_size_bytes)),
        operator: Arc::new(StdioOperator::terminal()),
        logger: Some(logger),
    };

    let outcome = run_session(&deps, &input)?;
    tracing::debug!(outcome = outcome_name(&outcome), "session finished");
    Ok(CliOutput::ok(String::new()))
}

fn session_input(args: &SessionArgs, config: &ValidatedConfig, cwd: PathBuf) -> RunSessionInput {
    RunSessionInput {
        cwd,
        root: args.root.as_deref().map(Into::into),
        item: args.item.as_deref().map(Into::into),
        assume_yes: args.yes,
        patterns: config.patterns().clone(),
        ignored_directories: config.scan.ignored_directories.clone(),
        ignored_files: config.scan.ignored_files.clone(),
        output_directory: PathBuf::from(config.output.directory.as_ref()),
        output_extension: config.output.extension.clone(),
        fence_language: config.output.fence_language.clone(),
    }
}

const fn outcome_name(outcome: &SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::InvalidRoot { .. } => "invalid_root",
        SessionOutcome::Empty { .. } => "empty",
        SessionOutcome::Cancelled { .. } => "cancelled",
        SessionOutcome::Completed(_) => "completed",
    }
}
