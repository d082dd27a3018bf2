//! Interactive walkthrough session: root, item, walk, confirm, assemble.

use crate::assemble_document::{
    AssembleDocumentDeps, AssembleDocumentInput, AssembleDocumentOutput, assemble_document,
};
use crate::find_matching_files::{FindMatchingFilesDeps, FindMatchingFilesInput, find_matching_files};
use crate::log_with;
use std::path::PathBuf;
use std::sync::Arc;
use stepdoc_domain::{
    FilePatterns, IgnoredDirectories, IgnoredFiles, OutputName, SessionState, absolutize,
};
use stepdoc_ports::{
    DescriptionProvider, FileSystemPort, FileSystemPortExt, LoggerPort, Notice, OperatorPort,
    log_fields,
};
use stepdoc_shared::{ErrorEnvelope, Result};

/// Dependencies required by a session.
#[derive(Clone)]
pub struct RunSessionDeps {
    /// Filesystem adapter.
    pub filesystem: Arc<dyn FileSystemPort>,
    /// Operator answering prompts.
    pub operator: Arc<dyn OperatorPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Session parameters.
///
/// `root` and `item` pre-answer their prompts when set. Relative paths are
/// resolved against `cwd`; ignored entries are resolved against the root.
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    /// Working directory used to resolve the root and output directory.
    pub cwd: PathBuf,
    /// Root directory answer.
    pub root: Option<Box<str>>,
    /// Item identifier answer.
    pub item: Option<Box<str>>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// File name patterns.
    pub patterns: FilePatterns,
    /// Ignored directories, relative to the root.
    pub ignored_directories: Vec<Box<str>>,
    /// Ignored files, relative to the root.
    pub ignored_files: Vec<Box<str>>,
    /// Output directory, relative to `cwd` unless absolute.
    pub output_directory: PathBuf,
    /// Output file extension.
    pub output_extension: Box<str>,
    /// Fence language tag.
    pub fence_language: Box<str>,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Root is missing or not a directory.
    InvalidRoot {
        /// Root as resolved.
        root: PathBuf,
    },
    /// Nothing matched.
    Empty {
        /// Walked root.
        root: PathBuf,
    },
    /// Operator declined the file list.
    Cancelled {
        /// Number of files that were listed.
        matched: usize,
    },
    /// Document written.
    Completed(AssembleDocumentOutput),
}

/// Run one session against the operator.
pub fn run_session(deps: &RunSessionDeps, input: &RunSessionInput) -> Result<SessionOutcome> {
    let mut state = SessionState::AwaitingRoot;

    let raw_root = match input.root.as_deref() {
        Some(root) => root.to_owned(),
        None => deps.operator.ask_root_dir()?,
    };
    let root = absolutize(std::path::Path::new(raw_root.trim()), &input.cwd);

    if !deps.filesystem.is_directory(&root)? {
        advance(&mut state, SessionState::RootRejected)?;
        deps.operator.notify(&Notice::InvalidRoot {
            root: root.display().to_string().into_boxed_str(),
        });
        log_with(deps.logger.as_deref(), |logger| {
            logger.warn(
                "session.root_rejected",
                "Root is not an existing directory",
                log_fields([("root", root.display().to_string())]),
            );
        });
        return Ok(SessionOutcome::InvalidRoot { root });
    }
    advance(&mut state, SessionState::Validated)?;

    let ignored_directories =
        IgnoredDirectories::resolve(&root, input.ignored_directories.iter());
    let ignored_files = IgnoredFiles::resolve(&root, input.ignored_files.iter());

    let raw_item = match input.item.as_deref() {
        Some(item) => item.to_owned(),
        None => deps.operator.ask_item_number()?,
    };
    let output_name =
        OutputName::new(&raw_item, &input.output_extension).map_err(ErrorEnvelope::from)?;
    let output_path = absolutize(&input.output_directory, &input.cwd).join(output_name.file_name());

    log_with(deps.logger.as_deref(), |logger| {
        logger.info(
            "session.started",
            "Walking root",
            log_fields([
                ("root", root.display().to_string()),
                ("item", output_name.item().to_owned()),
            ]),
        );
    });

    let matched = find_matching_files(
        &FindMatchingFilesDeps {
            filesystem: Arc::clone(&deps.filesystem),
            logger: deps.logger.clone(),
        },
        &FindMatchingFilesInput {
            root: &root,
            patterns: &input.patterns,
            ignored_directories: &ignored_directories,
            ignored_files: &ignored_files,
        },
    )?;
    advance(&mut state, SessionState::Walked)?;

    if matched.is_empty() {
        advance(&mut state, SessionState::Empty)?;
        deps.operator.notify(&Notice::NoMatches {
            patterns: pattern_list(&input.patterns).into_boxed_str(),
        });
        return Ok(SessionOutcome::Empty { root });
    }

    advance(&mut state, SessionState::AwaitingConfirmation)?;
    let labels = matched.labels(&root);
    let confirmed = input.assume_yes || deps.operator.confirm(&labels)?;
    if !confirmed {
        advance(&mut state, SessionState::Cancelled)?;
        deps.operator.notify(&Notice::Cancelled);
        log_with(deps.logger.as_deref(), |logger| {
            logger.info(
                "session.cancelled",
                "Operator declined the file list",
                log_fields([("matched", matched.len())]),
            );
        });
        return Ok(SessionOutcome::Cancelled {
            matched: matched.len(),
        });
    }

    advance(&mut state, SessionState::Assembling)?;
    deps.operator.notify(&Notice::DescriptionIntro);
    let descriptions: Arc<dyn DescriptionProvider> = deps.operator.clone();
    let output = assemble_document(
        &AssembleDocumentDeps {
            filesystem: Arc::clone(&deps.filesystem),
            descriptions,
            logger: deps.logger.clone(),
        },
        &AssembleDocumentInput {
            files: &matched,
            output_path: &output_path,
            base_dir: &root,
            fence_language: &input.fence_language,
        },
    )?;
    advance(&mut state, SessionState::Done)?;

    deps.operator.notify(&Notice::Saved {
        path: output.output_path.display().to_string().into_boxed_str(),
    });
    log_with(deps.logger.as_deref(), |logger| {
        logger.info(
            "session.completed",
            "Walkthrough saved",
            log_fields([
                (
                    "output_path",
                    serde_json::Value::from(output.output_path.display().to_string()),
                ),
                ("written", serde_json::Value::from(output.written.len())),
                ("skipped", serde_json::Value::from(output.skipped.len())),
            ]),
        );
    });

    Ok(SessionOutcome::Completed(output))
}

fn advance(state: &mut SessionState, next: SessionState) -> Result<()> {
    *state = state.advance(next)?;
    Ok(())
}

fn pattern_list(patterns: &FilePatterns) -> String {
    patterns
        .iter()
        .map(stepdoc_domain::FilePattern::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
