//! Tracing subscriber setup for the CLI.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging flags shared by every command.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log filter (e.g. `info`, `stepdoc_app=debug`). Falls back to `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Pick the filter directive: flag, then `RUST_LOG`, then `warn`.
fn resolve_filter(flag: Option<&str>) -> EnvFilter {
    if let Some(directive) = flag.map(str::trim).filter(|value| !value.is_empty())
        && let Ok(filter) = EnvFilter::try_new(directive)
    {
        return filter;
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to stderr. Safe to call once per process.
pub fn init(args: &LogArgs) {
    let filter = resolve_filter(args.log_level.as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber installed earlier keeps precedence.
    let _ = match args.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
