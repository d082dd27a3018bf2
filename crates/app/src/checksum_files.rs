//! SHA-256 listing of matched files.

use std::path::Path;
use stepdoc_domain::{MatchedFileList, relative_label};
use stepdoc_ports::FileSystemPort;
use stepdoc_shared::Result;

/// Digest of one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChecksum {
    /// Path label relative to the base directory.
    pub label: String,
    /// Lowercase hex digest, or the error that prevented hashing.
    pub digest: Result<String>,
}

/// Hash every file in order. Per-file failures are kept in the result.
pub fn checksum_files(
    filesystem: &dyn FileSystemPort,
    files: &MatchedFileList,
    base_dir: &Path,
) -> Vec<FileChecksum> {
    files
        .iter()
        .map(|file| FileChecksum {
            label: relative_label(file, base_dir),
            digest: filesystem.sha256(file),
        })
        .collect()
}
