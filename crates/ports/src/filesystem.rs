//! Filesystem boundary contract.

use std::ffi::OsString;
use std::path::Path;
use stepdoc_shared::Result;

/// File system entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSystemEntryKind {
    /// Regular file, or a symlink resolving to one.
    File,
    /// Directory (symlinked directories are reported as `Other`).
    Directory,
    /// Other / unknown.
    Other,
}

/// A directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemDirEntry {
    /// Entry name (single path segment), kept as the OS reported it.
    pub name: OsString,
    /// Entry kind.
    pub kind: FileSystemEntryKind,
}

impl FileSystemDirEntry {
    /// Build an entry.
    pub fn new(name: impl Into<OsString>, kind: FileSystemEntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// File system stat info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSystemStat {
    /// Kind of the entry.
    pub kind: FileSystemEntryKind,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl FileSystemStat {
    /// Returns true for directories.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == FileSystemEntryKind::Directory
    }
}

/// Writable output document.
///
/// Dropping a sink without calling [`DocumentSink::finish`] leaves whatever was
/// written so far on disk.
pub trait DocumentSink: Send {
    /// Append text.
    fn write_chunk(&mut self, chunk: &str) -> Result<()>;

    /// Flush buffered text and close the document.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Boundary contract for filesystem access.
///
/// All paths are absolute; callers resolve them before crossing the boundary.
pub trait FileSystemPort: Send + Sync {
    /// List directory entries.
    fn read_dir(&self, dir: &Path) -> Result<Vec<FileSystemDirEntry>>;

    /// Read a whole UTF-8 text file.
    fn read_file_text(&self, file: &Path) -> Result<Box<str>>;

    /// Read metadata, following symlinks.
    fn stat(&self, path: &Path) -> Result<FileSystemStat>;

    /// Create a directory and its parents (no-op when it exists).
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Create or truncate `file` for writing.
    fn create_document(&self, file: &Path) -> Result<Box<dyn DocumentSink>>;

    /// Lowercase hex SHA-256 of a file's bytes.
    fn sha256(&self, file: &Path) -> Result<String>;
}

/// Extension helpers for filesystem ports.
pub trait FileSystemPortExt {
    /// Returns `Ok(false)` for missing paths instead of an error.
    fn is_directory(&self, path: &Path) -> Result<bool>;
}

impl<T> FileSystemPortExt for T
where
    T: FileSystemPort + ?Sized,
{
    fn is_directory(&self, path: &Path) -> Result<bool> {
        match self.stat(path) {
            Ok(stat) => Ok(stat.is_directory()),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }
}
