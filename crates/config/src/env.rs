//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict (present-but-blank values fail fast) and list values
//! use comma separated entries.

use crate::schema::{SCAN_IGNORED_MAX, SCAN_PATTERNS_MAX, StepdocConfig, ValidatedConfig};
use std::collections::BTreeMap;
use std::fmt;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};

/// Env var: file patterns (CSV).
pub const ENV_SCAN_PATTERNS: &str = "STEPDOC_PATTERNS";
/// Env var: ignored directories (CSV).
pub const ENV_SCAN_IGNORED_DIRS: &str = "STEPDOC_IGNORED_DIRS";
/// Env var: ignored files (CSV).
pub const ENV_SCAN_IGNORED_FILES: &str = "STEPDOC_IGNORED_FILES";
/// Env var: max readable file size in bytes.
pub const ENV_SCAN_MAX_FILE_SIZE_BYTES: &str = "STEPDOC_MAX_FILE_SIZE_BYTES";
/// Env var: output directory.
pub const ENV_OUTPUT_DIR: &str = "STEPDOC_OUTPUT_DIR";
/// Env var: output file extension.
pub const ENV_OUTPUT_EXTENSION: &str = "STEPDOC_OUTPUT_EXTENSION";
/// Env var: code fence language tag.
pub const ENV_OUTPUT_FENCE_LANGUAGE: &str = "STEPDOC_FENCE_LANGUAGE";

const ALL_ENV_VARS: [&str; 7] = [
    ENV_SCAN_PATTERNS,
    ENV_SCAN_IGNORED_DIRS,
    ENV_SCAN_IGNORED_FILES,
    ENV_SCAN_MAX_FILE_SIZE_BYTES,
    ENV_OUTPUT_DIR,
    ENV_OUTPUT_EXTENSION,
    ENV_OUTPUT_FENCE_LANGUAGE,
];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepdocEnv {
    /// `STEPDOC_PATTERNS`.
    pub scan_patterns: Option<Vec<Box<str>>>,
    /// `STEPDOC_IGNORED_DIRS`.
    pub scan_ignored_directories: Option<Vec<Box<str>>>,
    /// `STEPDOC_IGNORED_FILES`.
    pub scan_ignored_files: Option<Vec<Box<str>>>,
    /// `STEPDOC_MAX_FILE_SIZE_BYTES`.
    pub scan_max_file_size_bytes: Option<u64>,
    /// `STEPDOC_OUTPUT_DIR`.
    pub output_directory: Option<Box<str>>,
    /// `STEPDOC_OUTPUT_EXTENSION`.
    pub output_extension: Option<Box<str>>,
    /// `STEPDOC_FENCE_LANGUAGE`.
    pub output_fence_language: Option<Box<str>>,
}

impl StepdocEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            scan_patterns: parse_optional_csv(map, ENV_SCAN_PATTERNS, SCAN_PATTERNS_MAX)?,
            scan_ignored_directories: parse_optional_csv(
                map,
                ENV_SCAN_IGNORED_DIRS,
                SCAN_IGNORED_MAX,
            )?,
            scan_ignored_files: parse_optional_csv(map, ENV_SCAN_IGNORED_FILES, SCAN_IGNORED_MAX)?,
            scan_max_file_size_bytes: parse_optional_u64(map, ENV_SCAN_MAX_FILE_SIZE_BYTES)?,
            output_directory: parse_optional_trimmed_string(map, ENV_OUTPUT_DIR)?,
            output_extension: parse_optional_trimmed_string(map, ENV_OUTPUT_EXTENSION)?,
            output_fence_language: parse_optional_trimmed_string(map, ENV_OUTPUT_FENCE_LANGUAGE)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Apply env overrides to `config`, then validate and normalize the result.
pub fn apply_env_overrides(
    mut config: StepdocConfig,
    env: &StepdocEnv,
) -> Result<ValidatedConfig, ErrorEnvelope> {
    if let Some(patterns) = &env.scan_patterns {
        config.scan.patterns.clone_from(patterns);
    }
    if let Some(directories) = &env.scan_ignored_directories {
        config.scan.ignored_directories.clone_from(directories);
    }
    if let Some(files) = &env.scan_ignored_files {
        config.scan.ignored_files.clone_from(files);
    }
    if let Some(max) = env.scan_max_file_size_bytes {
        config.scan.max_file_size_bytes = Some(max);
    }
    if let Some(directory) = &env.output_directory {
        config.output.directory.clone_from(directory);
    }
    if let Some(extension) = &env.output_extension {
        config.output.extension.clone_from(extension);
    }
    if let Some(language) = &env.output_fence_language {
        config.output.fence_language.clone_from(language);
    }

    config.validate_and_normalize().map_err(ErrorEnvelope::from)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// CSV list exceeds a safety limit.
    CsvTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of parsed items.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::CsvTooLarge { .. } => ErrorCode::new("config", "invalid_env_csv"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::CsvTooLarge { var, len, max } => {
                write!(formatter, "{var} must have at most {max} entries (got {len})")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("var", var),
            EnvParseError::InvalidInt { var, value } => envelope
                .with_metadata("var", var)
                .with_metadata("value", value),
            EnvParseError::CsvTooLarge { var, len, max } => envelope
                .with_metadata("var", var)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed.into()))
}

fn parse_optional_u64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u64>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.to_string(),
        })
}

fn parse_optional_csv(
    map: &BTreeMap<String, String>,
    var: &'static str,
    max: usize,
) -> Result<Option<Vec<Box<str>>>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };
    let entries = parse_csv(&raw);
    if entries.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    if entries.len() > max {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: entries.len(),
            max,
        });
    }
    Ok(Some(entries))
}

fn parse_csv(input: &str) -> Vec<Box<str>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Box::from)
        .collect()
}
