//! # stepdoc-domain
//!
//! Domain model for building walkthrough documents from a source tree.
//!
//! - **Paths** - lexical normalization and relative labels
//! - **Path filter** - ignored directory prefixes and ignored files
//! - **Patterns** - glob file name patterns
//! - **Matched files** - ordered, de-duplicated traversal results
//! - **Primitives** - `Description`, `OutputName`
//! - **Document** - section rendering
//! - **States** - `SessionState` transitions
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use stepdoc_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod document;
pub mod matched;
pub mod path_filter;
pub mod paths;
pub mod patterns;
pub mod primitives;
pub mod states;

pub use document::{DocumentSection, FENCE};
pub use matched::MatchedFileList;
pub use path_filter::{IgnoredDirectories, IgnoredFiles, is_ignored_directory, is_ignored_file};
pub use paths::{absolutize, normalize_lexically, relative_label};
pub use patterns::{FilePattern, FilePatterns, PatternError};
pub use primitives::{Description, OutputName, PrimitiveError};
pub use states::{SESSION_TRANSITIONS, SessionState, SessionTransitionError};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
