//! # stepdoc-app
//!
//! Application use cases: walking a source tree, assembling the walkthrough
//! document, and the interactive session tying them together.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod assemble_document;
pub mod checksum_files;
pub mod find_matching_files;
pub mod run_session;

pub use assemble_document::{
    AssembleDocumentDeps, AssembleDocumentInput, AssembleDocumentOutput, SkippedFile,
    assemble_document,
};
pub use checksum_files::{FileChecksum, checksum_files};
pub use find_matching_files::{FindMatchingFilesDeps, FindMatchingFilesInput, find_matching_files};
pub use run_session::{RunSessionDeps, RunSessionInput, SessionOutcome, run_session};

use stepdoc_ports::LoggerPort;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub(crate) fn log_with(logger: Option<&dyn LoggerPort>, emit: impl FnOnce(&dyn LoggerPort)) {
    if let Some(logger) = logger {
        emit(logger);
    }
}
