//! Domain primitives with validated constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};

/// Validation failures for operator-provided values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// `Description` is empty after trimming.
    EmptyDescription {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Item identifier is empty after trimming.
    EmptyItemNumber {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Item identifier would escape the output directory.
    InvalidItemNumber {
        /// Trimmed identifier that failed validation.
        input: String,
    },
    /// Output extension contains a separator or dot.
    InvalidExtension {
        /// Extension that failed validation.
        input: String,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyDescription { .. } => ErrorCode::new("domain", "empty_description"),
            Self::EmptyItemNumber { .. } | Self::InvalidItemNumber { .. } => {
                ErrorCode::new("domain", "invalid_item_number")
            },
            Self::InvalidExtension { .. } => ErrorCode::new("domain", "invalid_extension"),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription { .. } => formatter.write_str("Description cannot be empty"),
            Self::EmptyItemNumber { .. } => formatter.write_str("Item number cannot be empty"),
            Self::InvalidItemNumber { input } => write!(
                formatter,
                "Item number `{input}` must not contain path separators or be `.`/`..`"
            ),
            Self::InvalidExtension { input } => write!(
                formatter,
                "Output extension `{input}` must not contain path separators or dots"
            ),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::EmptyDescription { input_length }
            | PrimitiveError::EmptyItemNumber { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
            PrimitiveError::InvalidItemNumber { input }
            | PrimitiveError::InvalidExtension { input } => envelope.with_metadata("input", input),
        }
    }
}

/// Operator-written summary of one file. Always non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(Box<str>);

impl Description {
    /// Trim and validate raw operator input.
    pub fn parse(raw: &str) -> Result<Self, PrimitiveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::EmptyDescription {
                input_length: raw.len(),
            });
        }
        Ok(Self(trimmed.into()))
    }

    /// Borrow the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Output file name built from the operator's item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputName {
    item: Box<str>,
    file_name: Box<str>,
}

impl OutputName {
    /// Validate `item` and append `extension` (given with or without a leading dot).
    pub fn new(item: &str, extension: &str) -> Result<Self, PrimitiveError> {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::EmptyItemNumber {
                input_length: item.len(),
            });
        }
        if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\', '\0']) {
            return Err(PrimitiveError::InvalidItemNumber {
                input: trimmed.to_owned(),
            });
        }

        let extension = extension.trim().trim_start_matches('.');
        if extension.contains(['/', '\\', '.', '\0']) {
            return Err(PrimitiveError::InvalidExtension {
                input: extension.to_owned(),
            });
        }

        let file_name = if extension.is_empty() {
            trimmed.to_owned()
        } else {
            format!("{trimmed}.{extension}")
        };
        Ok(Self {
            item: trimmed.into(),
            file_name: file_name.into_boxed_str(),
        })
    }

    /// The item identifier without extension.
    #[must_use]
    pub fn item(&self) -> &str {
        &self.item
    }

    /// The full file name, e.g. `42.md`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.file_name)
    }
}
