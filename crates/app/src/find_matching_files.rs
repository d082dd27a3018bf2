//! Source tree traversal.

use crate::log_with;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepdoc_domain::{
    FilePatterns, IgnoredDirectories, IgnoredFiles, MatchedFileList, is_ignored_directory,
    is_ignored_file,
};
use stepdoc_ports::{FileSystemEntryKind, FileSystemPort, LoggerPort, log_fields};
use stepdoc_shared::Result;

/// Dependencies required by the walk.
#[derive(Clone)]
pub struct FindMatchingFilesDeps {
    /// Filesystem adapter.
    pub filesystem: Arc<dyn FileSystemPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Walk parameters. All paths are absolute and normalized.
#[derive(Debug, Clone, Copy)]
pub struct FindMatchingFilesInput<'a> {
    /// Directory the walk starts from.
    pub root: &'a Path,
    /// File name patterns, in priority order.
    pub patterns: &'a FilePatterns,
    /// Subtrees that are never entered.
    pub ignored_directories: &'a IgnoredDirectories,
    /// Files excluded by exact path.
    pub ignored_files: &'a IgnoredFiles,
}

/// Depth-first pre-order walk collecting files that match any pattern.
///
/// Within one directory, files are grouped by the first pattern that matches
/// them, in pattern order, and sorted by name inside each group.
pub fn find_matching_files(
    deps: &FindMatchingFilesDeps,
    input: &FindMatchingFilesInput<'_>,
) -> Result<MatchedFileList> {
    let mut matched = MatchedFileList::new();
    let mut pending: Vec<PathBuf> = vec![input.root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match deps.filesystem.read_dir(&dir) {
            Ok(entries) => entries,
            Err(error) if dir.as_path() == input.root => return Err(error),
            Err(error) => {
                log_with(deps.logger.as_deref(), |logger| {
                    logger.warn(
                        "walk.dir_read_failed",
                        "Cannot read directory during walk; skipping subtree",
                        log_fields([
                            ("path", dir.display().to_string()),
                            ("code", error.code.to_string()),
                        ]),
                    );
                });
                continue;
            },
        };

        let mut entries = entries;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for entry in &entries {
            let path = dir.join(&entry.name);
            match entry.kind {
                FileSystemEntryKind::Directory => {
                    if !is_ignored_directory(&path, input.ignored_directories) {
                        subdirs.push(path);
                    }
                },
                FileSystemEntryKind::File => files.push((entry.name.as_os_str(), path)),
                FileSystemEntryKind::Other => {},
            }
        }

        for pattern in input.patterns {
            for (name, path) in &files {
                if pattern.matches(name)
                    && !is_ignored_file(path, input.ignored_files)
                    && !matched.contains(path)
                {
                    matched.push(path.clone());
                }
            }
        }

        // Reverse so the first subdirectory is visited next.
        pending.extend(subdirs.into_iter().rev());
    }

    log_with(deps.logger.as_deref(), |logger| {
        logger.debug(
            "walk.completed",
            "Walk completed",
            log_fields([
                ("root", serde_json::Value::from(input.root.display().to_string())),
                ("matched", serde_json::Value::from(matched.len())),
            ]),
        );
    });

    Ok(matched)
}
