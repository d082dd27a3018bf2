//! Config command handlers.

use crate::CliOutput;
use crate::commands::session::load_config;
use crate::error::CliError;
use clap::ValueEnum;
use std::path::Path;
use stepdoc_config::{to_pretty_json, to_pretty_toml};

/// Rendering for `config show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigShowFormat {
    /// TOML document.
    #[default]
    Toml,
    /// Pretty JSON document.
    Json,
}

/// Print the effective config after file, env and flag overrides.
pub fn run_config_show(
    format: ConfigShowFormat,
    config_path: Option<&Path>,
    output_dir: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let config = load_config(config_path, output_dir)?;
    let rendered = match format {
        ConfigShowFormat::Toml => to_pretty_toml(config.as_ref())?,
        ConfigShowFormat::Json => to_pretty_json(config.as_ref())?,
    };
    Ok(CliOutput::ok(rendered))
}
