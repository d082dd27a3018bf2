//! # stepdoc-shared
//!
//! Shared result types, error handling, and checksum helpers for the stepdoc workspace.
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Error envelopes serialize for structured output

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod checksum;
pub mod errors;
pub mod result;

pub use checksum::{CHECKSUM_CHUNK_SIZE, sha256_bytes, sha256_file, sha256_reader};
pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
