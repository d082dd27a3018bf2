//! Configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Pattern order is significant and preserved; ignore lists are sorted.

use serde::{Deserialize, Serialize};
use std::fmt;
use stepdoc_domain::FilePatterns;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

pub(crate) const SCAN_PATTERNS_MAX: usize = 128;
pub(crate) const SCAN_IGNORED_MAX: usize = 512;
const SCAN_MAX_FILE_SIZE_MIN_BYTES: u64 = 1;
const SCAN_MAX_FILE_SIZE_MAX_BYTES: u64 = 100_000_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct StepdocConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Traversal and filtering settings.
    pub scan: ScanConfig,
    /// Output document settings.
    pub output: OutputConfig,
}

impl Default for StepdocConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl StepdocConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.scan.normalize_and_validate()?;
        self.output.normalize_and_validate()?;

        let patterns = FilePatterns::parse(self.scan.patterns.iter()).map_err(|error| {
            ConfigSchemaError::InvalidPattern {
                reason: error.to_string(),
            }
        })?;
        Ok(ValidatedConfig {
            raw: self,
            patterns,
        })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Validated config wrapper carrying compiled patterns.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    raw: StepdocConfig,
    patterns: FilePatterns,
}

impl ValidatedConfig {
    /// Compiled file patterns.
    #[must_use]
    pub const fn patterns(&self) -> &FilePatterns {
        &self.patterns
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &StepdocConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> StepdocConfig {
        self.raw
    }
}

impl AsRef<StepdocConfig> for ValidatedConfig {
    fn as_ref(&self) -> &StepdocConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedConfig {
    type Target = StepdocConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Traversal and filtering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ScanConfig {
    /// File name globs, matched in order.
    pub patterns: Vec<Box<str>>,
    /// Directories (relative to the root unless absolute) whose subtrees are skipped.
    pub ignored_directories: Vec<Box<str>>,
    /// Files (relative to the root unless absolute) that are never included.
    pub ignored_files: Vec<Box<str>>,
    /// Files larger than this are skipped during assembly. Unset means no cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_bytes: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            patterns: boxed(&["*.ts", "*.tsx"]),
            ignored_directories: boxed(&["node_modules", "dist", "components/ui"]),
            ignored_files: boxed(&[
                "next-env.d.ts",
                "next.config.ts",
                "tailwind.config.ts",
                "postcss.config.ts",
                "tsconfig.json",
                "tsconfig.node.json",
                "tsconfig.app.json",
            ]),
            max_file_size_bytes: None,
        }
    }
}

impl ScanConfig {
    fn normalize_and_validate(&mut self) -> Result<(), ConfigSchemaError> {
        self.patterns = normalize_patterns(&self.patterns)?;
        self.ignored_directories =
            normalize_ignored_paths("ignoredDirectories", &self.ignored_directories)?;
        self.ignored_files = normalize_ignored_paths("ignoredFiles", &self.ignored_files)?;

        check_list_len("patterns", self.patterns.len(), SCAN_PATTERNS_MAX)?;
        check_list_len(
            "ignoredDirectories",
            self.ignored_directories.len(),
            SCAN_IGNORED_MAX,
        )?;
        check_list_len("ignoredFiles", self.ignored_files.len(), SCAN_IGNORED_MAX)?;

        if let Some(max) = self.max_file_size_bytes
            && !(SCAN_MAX_FILE_SIZE_MIN_BYTES..=SCAN_MAX_FILE_SIZE_MAX_BYTES).contains(&max)
        {
            return Err(ConfigSchemaError::LimitOutOfRange {
                section: "scan",
                field: "maxFileSizeBytes",
                value: max,
                min: SCAN_MAX_FILE_SIZE_MIN_BYTES,
                max: SCAN_MAX_FILE_SIZE_MAX_BYTES,
            });
        }
        Ok(())
    }
}

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Output directory, relative to the working directory unless absolute.
    pub directory: Box<str>,
    /// Output file extension (no leading dot).
    pub extension: Box<str>,
    /// Language tag written after the opening code fence.
    pub fence_language: Box<str>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "markdown-outputs".into(),
            extension: "md".into(),
            fence_language: "tsx".into(),
        }
    }
}

impl OutputConfig {
    fn normalize_and_validate(&mut self) -> Result<(), ConfigSchemaError> {
        let directory = self.directory.trim();
        if directory.is_empty() {
            return Err(ConfigSchemaError::InvalidOutput {
                field: "directory",
                value: self.directory.to_string(),
            });
        }
        self.directory = directory.into();

        let extension = self.extension.trim().trim_start_matches('.');
        if extension.is_empty()
            || !extension
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        {
            return Err(ConfigSchemaError::InvalidOutput {
                field: "extension",
                value: self.extension.to_string(),
            });
        }
        self.extension = extension.into();

        let language = self.fence_language.trim();
        if language.chars().any(|ch| ch.is_whitespace() || ch == '`') {
            return Err(ConfigSchemaError::InvalidOutput {
                field: "fenceLanguage",
                value: self.fence_language.to_string(),
            });
        }
        self.fence_language = language.into();
        Ok(())
    }
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `scan`).
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
    /// A list field exceeds the maximum allowed size.
    ListTooLarge {
        /// Field name in the `scan` section.
        field: &'static str,
        /// Number of entries after normalization/deduplication.
        len: usize,
        /// Maximum allowed number of entries.
        max: usize,
    },
    /// No file patterns are configured.
    NoPatterns,
    /// A file pattern is not valid glob syntax.
    InvalidPattern {
        /// Parser message.
        reason: String,
    },
    /// An ignored path entry is blank.
    InvalidIgnoredPath {
        /// Field name in the `scan` section.
        field: &'static str,
        /// Raw entry.
        entry: String,
    },
    /// An output setting is invalid.
    InvalidOutput {
        /// Field name in the `output` section.
        field: &'static str,
        /// Raw value.
        value: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
            Self::ListTooLarge { .. } => ErrorCode::new("config", "list_too_large"),
            Self::NoPatterns | Self::InvalidPattern { .. } => {
                ErrorCode::new("config", "invalid_pattern")
            },
            Self::InvalidIgnoredPath { .. } => ErrorCode::new("config", "invalid_ignored_path"),
            Self::InvalidOutput { .. } => ErrorCode::new("config", "invalid_output"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version: {found} (supported: {supported})"
            ),
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
            Self::ListTooLarge { field, len, max } => write!(
                formatter,
                "scan.{field} must have at most {max} entries (got {len})"
            ),
            Self::NoPatterns => formatter.write_str("scan.patterns must have at least one entry"),
            Self::InvalidPattern { reason } => write!(formatter, "scan.patterns: {reason}"),
            Self::InvalidIgnoredPath { field, .. } => {
                write!(formatter, "scan.{field} entries must be non-empty")
            },
            Self::InvalidOutput { field, value } => {
                write!(formatter, "invalid output.{field}: `{value}`")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::ListTooLarge { field, len, max } => envelope
                .with_metadata("field", field)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::NoPatterns => envelope.with_metadata("field", "patterns"),
            ConfigSchemaError::InvalidPattern { reason } => envelope
                .with_metadata("field", "patterns")
                .with_metadata("reason", reason),
            ConfigSchemaError::InvalidIgnoredPath { field, entry } => envelope
                .with_metadata("field", field)
                .with_metadata("entry", entry),
            ConfigSchemaError::InvalidOutput { field, value } => envelope
                .with_metadata("field", field)
                .with_metadata("value", value),
        }
    }
}

/// Parse and validate a JSON config document.
pub fn parse_config_json(input: &str) -> Result<ValidatedConfig, ErrorEnvelope> {
    let config: StepdocConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;
    config.validate_and_normalize().map_err(ErrorEnvelope::from)
}

/// Parse and validate a TOML config document.
pub fn parse_config_toml(input: &str) -> Result<ValidatedConfig, ErrorEnvelope> {
    let config: StepdocConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;
    config.validate_and_normalize().map_err(ErrorEnvelope::from)
}

fn boxed(values: &[&str]) -> Vec<Box<str>> {
    values.iter().map(|value| Box::from(*value)).collect()
}

fn check_list_len(field: &'static str, len: usize, max: usize) -> Result<(), ConfigSchemaError> {
    if len > max {
        return Err(ConfigSchemaError::ListTooLarge { field, len, max });
    }
    Ok(())
}

pub(crate) fn normalize_patterns(input: &[Box<str>]) -> Result<Vec<Box<str>>, ConfigSchemaError> {
    let mut normalized: Vec<Box<str>> = Vec::with_capacity(input.len());
    for pattern in input {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !normalized.iter().any(|existing| existing.as_ref() == trimmed) {
            normalized.push(trimmed.into());
        }
    }
    if normalized.is_empty() {
        return Err(ConfigSchemaError::NoPatterns);
    }
    Ok(normalized)
}

pub(crate) fn normalize_ignored_paths(
    field: &'static str,
    input: &[Box<str>],
) -> Result<Vec<Box<str>>, ConfigSchemaError> {
    let mut normalized = Vec::with_capacity(input.len());
    for entry in input {
        let raw = entry.trim();
        if raw.is_empty() {
            return Err(ConfigSchemaError::InvalidIgnoredPath {
                field,
                entry: entry.to_string(),
            });
        }
        let replaced = raw.replace('\\', "/");
        let collapsed = collapse_forward_slashes(&replaced);
        let trimmed = if collapsed.len() > 1 {
            collapsed.trim_end_matches('/')
        } else {
            collapsed.as_str()
        };
        normalized.push(Box::from(trimmed));
    }

    normalized.sort_unstable();
    normalized.dedup();
    Ok(normalized)
}

fn collapse_forward_slashes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut previous_was_slash = false;

    for ch in input.chars() {
        if ch == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        output.push(ch);
    }

    output
}
