//! CLI binary entrypoint.

mod commands;
mod error;
mod logging;

use clap::{Parser, Subcommand};
use commands::{ConfigShowFormat, SessionArgs, run_checksum, run_config_show, run_walkthrough};
use error::{CliError, ExitCode};
use logging::LogArgs;
use std::io::{self, Write};
use std::path::PathBuf;
use stepdoc_ports::Notice;

#[derive(Debug, Parser)]
#[command(
    name = "stepdoc",
    version,
    about = "Turn a source tree into a step-by-step markdown walkthrough",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    /// Config file (TOML or JSON, picked by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the document is written to (default `markdown-outputs`).
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    logging: LogArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a SHA-256 for every file the walk would include.
    Checksum {
        /// Root directory to walk (defaults to the current directory).
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config.
    Show {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ConfigShowFormat::Toml)]
        format: ConfigShowFormat,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

impl CliOutput {
    pub(crate) const fn ok(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code: ExitCode::Ok,
        }
    }

    pub(crate) const fn invalid_input(stderr: String) -> Self {
        Self {
            stdout: String::new(),
            stderr,
            exit_code: ExitCode::InvalidInput,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.logging);
    tracing::debug!(command = command_name(cli.command.as_ref()), "stepdoc started");

    match run(&cli) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn run(cli: &Cli) -> Result<CliOutput, CliError> {
    let config = cli.config.as_deref();
    let output_dir = cli.output_dir.as_deref();
    match &cli.command {
        None => run_walkthrough(&cli.session, config, output_dir),
        Some(Commands::Checksum { root }) => run_checksum(root.as_deref(), config),
        Some(Commands::Config {
            command: ConfigCommands::Show { format },
        }) => run_config_show(*format, config, output_dir),
    }
}

const fn command_name(command: Option<&Commands>) -> &'static str {
    match command {
        None => "walkthrough",
        Some(Commands::Checksum { .. }) => "checksum",
        Some(Commands::Config { .. }) => "config_show",
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    if !output.stdout.is_empty() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.stdout.as_bytes())?;
        stdout.flush()?;
    }
    if !output.stderr.is_empty() {
        let mut stderr = io::stderr().lock();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }
    Ok(())
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    if error.is_cancelled() {
        let _ = writeln!(io::stdout(), "\n{}", Notice::Cancelled);
    } else {
        tracing::error!(exit_code = error.exit_code().as_u8(), "command failed");
        let _ = writeln!(io::stderr(), "error: {error}");
    }
    std::process::ExitCode::from(error.exit_code().as_u8())
}
