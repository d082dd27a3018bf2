//! # stepdoc-adapters
//!
//! Adapter implementations for ports (filesystem, terminal operator, logging).
//! This crate depends on `ports` and `shared`.

pub mod fs;
pub mod logger;
pub mod operator;

pub use fs::LocalFileSystem;
pub use logger::TracingLogger;
pub use operator::StdioOperator;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
