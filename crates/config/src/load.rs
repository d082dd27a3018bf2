//! Config loading helpers (file + env + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{StepdocConfig, StepdocEnv, ValidatedConfig, apply_env_overrides};
use std::path::Path;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};

/// Config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension (`.json` or `.toml`; none means JSON).
    pub fn from_path(path: &Path) -> Result<Self, ErrorEnvelope> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_format"),
                "unsupported config format; use .json or .toml",
            )
            .with_metadata("extension", other.to_string())),
        }
    }
}

/// Command-line overrides; these win over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Output directory override.
    pub output_directory: Option<Box<str>>,
}

/// Load the config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - command-line overrides
/// - env overrides (`StepdocEnv`)
/// - config file content
/// - defaults (`StepdocConfig::default()`)
pub fn load_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    overrides: &ConfigOverrides,
    env: &StepdocEnv,
) -> Result<ValidatedConfig, ErrorEnvelope> {
    let config = match config_text {
        None => StepdocConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    // env validates/normalizes the merged config; overrides are re-validated below.
    let validated = apply_env_overrides(config, env)?;
    apply_overrides(validated, overrides)
}

/// Load the config from an optional file path.
pub fn load_config_from_path(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    env: &StepdocEnv,
) -> Result<ValidatedConfig, ErrorEnvelope> {
    match config_path {
        None => load_config_from_sources(None, overrides, env),
        Some(path) => {
            let config_text = read_config_file(path)?;
            let format = ConfigFormat::from_path(path)?;
            load_config_from_sources(Some((config_text.as_str(), format)), overrides, env)
                .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))
        },
    }
}

/// Load the config from std env and an optional file path.
pub fn load_config_std_env(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ValidatedConfig, ErrorEnvelope> {
    let env = StepdocEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_config_from_path(config_path, overrides, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &StepdocConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_json"),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &StepdocConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn apply_overrides(
    validated: ValidatedConfig,
    overrides: &ConfigOverrides,
) -> Result<ValidatedConfig, ErrorEnvelope> {
    if overrides == &ConfigOverrides::default() {
        return Ok(validated);
    }
    let mut config = validated.into_inner();
    if let Some(directory) = &overrides.output_directory {
        config.output.directory.clone_from(directory);
    }
    config
        .validate_and_normalize()
        .map_err(|error| ErrorEnvelope::from(error).with_metadata("source", "overrides"))
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<StepdocConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}
