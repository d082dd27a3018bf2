//! Checksum command handler.

use crate::CliOutput;
use crate::commands::session::load_config;
use crate::error::CliError;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use stepdoc_adapters::{LocalFileSystem, TracingLogger};
use stepdoc_app::{
    FileChecksum, FindMatchingFilesDeps, FindMatchingFilesInput, checksum_files,
    find_matching_files,
};
use stepdoc_config::ValidatedConfig;
use stepdoc_domain::{IgnoredDirectories, IgnoredFiles, absolutize};
use stepdoc_ports::{FileSystemPort, FileSystemPortExt, Notice};

/// Walk `root` with the configured filters and list a SHA-256 per matched file.
pub fn run_checksum(
    root: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let config = load_config(config_path, None)?;
    let cwd = std::env::current_dir()?;
    let root = absolutize(root.unwrap_or_else(|| Path::new(".")), &cwd);
    let filesystem: Arc<dyn FileSystemPort> =
        Arc::new(LocalFileSystem::new(config.scan.max_file_size_bytes));

    if !filesystem.is_directory(&root)? {
        let notice = Notice::InvalidRoot {
            root: root.display().to_string().into_boxed_str(),
        };
        return Ok(CliOutput::invalid_input(format!("{notice}\n")));
    }

    let checksums = walk_and_hash(&filesystem, &config, &root)?;
    if checksums.is_empty() {
        let notice = Notice::NoMatches {
            patterns: config.scan.patterns.join(", ").into_boxed_str(),
        };
        return Ok(CliOutput::ok(format!("{notice}\n")));
    }
    Ok(CliOutput::ok(format_checksums(&checksums)))
}

fn walk_and_hash(
    filesystem: &Arc<dyn FileSystemPort>,
    config: &ValidatedConfig,
    root: &Path,
) -> Result<Vec<FileChecksum>, CliError> {
    let ignored_directories = IgnoredDirectories::resolve(root, &config.scan.ignored_directories);
    let ignored_files = IgnoredFiles::resolve(root, &config.scan.ignored_files);
    let deps = FindMatchingFilesDeps {
        filesystem: Arc::clone(filesystem),
        logger: Some(Arc::new(TracingLogger::new())),
    };
    let matched = find_matching_files(
        &deps,
        &FindMatchingFilesInput {
            root,
            patterns: config.patterns(),
            ignored_directories: &ignored_directories,
            ignored_files: &ignored_files,
        },
    )?;
    Ok(checksum_files(filesystem.as_ref(), &matched, root))
}

/// One line per file; errors take the digest's place.
fn format_checksums(checksums: &[FileChecksum]) -> String {
    let mut out = String::new();
    for checksum in checksums {
        let _ = match &checksum.digest {
            Ok(digest) => writeln!(out, "{digest}  {}", checksum.label),
            Err(error) => writeln!(out, "Error: {}  {}", error.message, checksum.label),
        };
    }
    out
}
