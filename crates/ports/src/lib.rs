//! # stepdoc-ports
//!
//! Port traits for the stepdoc hexagonal architecture.
//!
//! This crate defines the interfaces between the use cases and the outside
//! world: the filesystem, the operator answering prompts, and structured
//! logging. It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod filesystem;
pub mod logger;
pub mod operator;

pub use filesystem::*;
pub use logger::*;
pub use operator::*;

// Re-export selected domain types used alongside port signatures, so adapter
// crates can implement ports without directly depending on `stepdoc-domain`.
pub use stepdoc_domain::{MatchedFileList, relative_label};
