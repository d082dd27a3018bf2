//! Local filesystem adapter.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use stepdoc_ports::{
    DocumentSink, FileSystemDirEntry, FileSystemEntryKind, FileSystemPort, FileSystemStat,
};
use stepdoc_shared::{ErrorCode, ErrorEnvelope, Result, ResultExt, sha256_file};

/// Local filesystem adapter using blocking std IO.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    max_file_size_bytes: Option<u64>,
}

impl LocalFileSystem {
    /// Build a filesystem adapter with an optional max file size.
    pub const fn new(max_file_size_bytes: Option<u64>) -> Self {
        Self {
            max_file_size_bytes,
        }
    }
}

impl FileSystemPort for LocalFileSystem {
    fn read_dir(&self, dir: &Path) -> Result<Vec<FileSystemDirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).with_path(dir)? {
            let entry = entry.with_path(dir)?;
            let file_type = entry.file_type().with_path(&entry.path())?;
            let kind = if file_type.is_file() {
                FileSystemEntryKind::File
            } else if file_type.is_dir() {
                FileSystemEntryKind::Directory
            } else if file_type.is_symlink() {
                symlink_kind(&entry.path())
            } else {
                FileSystemEntryKind::Other
            };
            entries.push(FileSystemDirEntry::new(entry.file_name(), kind));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file_text(&self, file: &Path) -> Result<Box<str>> {
        let metadata = fs::metadata(file).with_path(file)?;
        if !metadata.is_file() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "path is not a file",
            )
            .with_metadata("path", file.display().to_string()));
        }
        if let Some(limit) = self.max_file_size_bytes
            && metadata.len() > limit
        {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("fs", "file_too_large"),
                format!("file exceeds max size of {limit} bytes"),
            )
            .with_metadata("path", file.display().to_string())
            .with_metadata("size_bytes", metadata.len().to_string()));
        }

        let bytes = fs::read(file).with_path(file)?;
        let contents = String::from_utf8(bytes).map_err(|_| {
            ErrorEnvelope::unexpected(ErrorCode::invalid_data(), "file is not valid UTF-8")
                .with_metadata("path", file.display().to_string())
        })?;
        Ok(contents.into_boxed_str())
    }

    fn stat(&self, path: &Path) -> Result<FileSystemStat> {
        let metadata = fs::metadata(path).with_path(path)?;
        let file_type = metadata.file_type();
        let kind = if file_type.is_file() {
            FileSystemEntryKind::File
        } else if file_type.is_dir() {
            FileSystemEntryKind::Directory
        } else {
            FileSystemEntryKind::Other
        };

        Ok(FileSystemStat {
            kind,
            size_bytes: metadata.len(),
        })
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).with_path(dir)
    }

    fn create_document(&self, file: &Path) -> Result<Box<dyn DocumentSink>> {
        let handle = File::create(file).with_path(file)?;
        Ok(Box::new(LocalDocument {
            path: file.to_path_buf(),
            writer: BufWriter::new(handle),
        }))
    }

    fn sha256(&self, file: &Path) -> Result<String> {
        sha256_file(file)
    }
}

/// Symlinks count as files when they resolve to one; directory links are not followed.
fn symlink_kind(path: &Path) -> FileSystemEntryKind {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => FileSystemEntryKind::File,
        _ => FileSystemEntryKind::Other,
    }
}

struct LocalDocument {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl DocumentSink for LocalDocument {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.writer.write_all(chunk.as_bytes()).with_path(&self.path)
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().with_path(&self.path)
    }
}
