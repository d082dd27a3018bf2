//! Operator interaction boundary contract.
//!
//! Every question the session asks goes through these traits, so the whole
//! flow can run against scripted answers.

use std::fmt;
use stepdoc_shared::Result;

/// Request for one file description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionRequest<'a> {
    /// Path label of the file being described.
    pub label: &'a str,
    /// 1 for the first ask, incremented after each blank answer.
    pub attempt: u32,
}

/// Why a matched file was left out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File vanished between the walk and assembly.
    Missing,
    /// File exists but could not be read as text.
    Unreadable {
        /// Underlying error message.
        message: Box<str>,
    },
}

/// Status messages surfaced to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Root path is missing or not a directory.
    InvalidRoot {
        /// Root as resolved.
        root: Box<str>,
    },
    /// Walk found nothing.
    NoMatches {
        /// Configured patterns, comma separated.
        patterns: Box<str>,
    },
    /// Operator declined the file list.
    Cancelled,
    /// Description prompts are about to start.
    DescriptionIntro,
    /// A blank description was rejected.
    EmptyDescription {
        /// File being described.
        label: Box<str>,
    },
    /// A file was skipped during assembly.
    FileSkipped {
        /// Skipped file.
        label: Box<str>,
        /// Reason.
        reason: SkipReason,
    },
    /// Output document written.
    Saved {
        /// Output path.
        path: Box<str>,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoot { root } => {
                write!(formatter, "Error: The directory '{root}' does not exist.")
            },
            Self::NoMatches { patterns } => write!(
                formatter,
                "No files matching {patterns} found in the specified directory."
            ),
            Self::Cancelled => formatter.write_str("Operation cancelled."),
            Self::DescriptionIntro => {
                formatter.write_str("Please provide a short message for each file:")
            },
            Self::EmptyDescription { .. } => {
                formatter.write_str("Description cannot be empty. Please try again.")
            },
            Self::FileSkipped {
                label,
                reason: SkipReason::Missing,
            } => write!(formatter, "Warning: File not found - {label}"),
            Self::FileSkipped {
                label,
                reason: SkipReason::Unreadable { message },
            } => write!(formatter, "Warning: Could not read {label}: {message}"),
            Self::Saved { path } => write!(formatter, "Output saved to {path}"),
        }
    }
}

/// Source of file descriptions.
pub trait DescriptionProvider: Send + Sync {
    /// Ask for one description. Blank answers are handled by the caller.
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String>;

    /// Receive a status message. Ignored by default.
    fn notify(&self, notice: &Notice) {
        let _ = notice;
    }
}

impl<F> DescriptionProvider for F
where
    F: Fn(&DescriptionRequest<'_>) -> Result<String> + Send + Sync,
{
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String> {
        self(request)
    }
}

/// Full interactive operator: session questions plus descriptions.
pub trait OperatorPort: DescriptionProvider {
    /// Ask for the root directory.
    fn ask_root_dir(&self) -> Result<String>;

    /// Ask for the item identifier that names the output file.
    fn ask_item_number(&self) -> Result<String>;

    /// Show the matched labels and ask whether to continue.
    fn confirm(&self, labels: &[String]) -> Result<bool>;
}

/// Returns true for an affirmative confirmation answer (`y`, any case).
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
