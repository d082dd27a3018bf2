//! Write the walkthrough document for a list of matched files.

use crate::log_with;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepdoc_domain::{Description, DocumentSection, MatchedFileList, relative_label};
use stepdoc_ports::{
    DescriptionProvider, DescriptionRequest, DocumentSink, FileSystemPort, LoggerPort, Notice,
    SkipReason, log_fields,
};
use stepdoc_shared::{ErrorCode, ErrorEnvelope, Result};

/// Dependencies required by document assembly.
#[derive(Clone)]
pub struct AssembleDocumentDeps {
    /// Filesystem adapter.
    pub filesystem: Arc<dyn FileSystemPort>,
    /// Source of per-file descriptions.
    pub descriptions: Arc<dyn DescriptionProvider>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Input payload for document assembly.
#[derive(Debug, Clone, Copy)]
pub struct AssembleDocumentInput<'a> {
    /// Files to include, in document order.
    pub files: &'a MatchedFileList,
    /// Absolute path of the document to write.
    pub output_path: &'a Path,
    /// Labels are computed relative to this directory.
    pub base_dir: &'a Path,
    /// Language tag placed after the opening fence.
    pub fence_language: &'a str,
}

/// File left out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path label.
    pub label: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of a completed assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleDocumentOutput {
    /// Path of the written document.
    pub output_path: PathBuf,
    /// Labels written, in order.
    pub written: Vec<String>,
    /// Files that could not be read.
    pub skipped: Vec<SkippedFile>,
}

/// Ask for a description of every file and write one section per readable file.
///
/// The output file is created (or truncated) before the first prompt. Failing
/// to open or write it aborts the assembly.
pub fn assemble_document(
    deps: &AssembleDocumentDeps,
    input: &AssembleDocumentInput<'_>,
) -> Result<AssembleDocumentOutput> {
    let mut sink = open_output(deps.filesystem.as_ref(), input.output_path)?;
    let mut written = Vec::new();
    let mut skipped = Vec::new();
    let mut section = String::new();

    for file in input.files.iter() {
        let label = relative_label(file, input.base_dir);
        let description = request_description(deps.descriptions.as_ref(), &label)?;

        let content = match deps.filesystem.read_file_text(file) {
            Ok(content) => content,
            Err(error) if error.is_cancelled() => return Err(error),
            Err(error) => {
                let reason = skip_reason(&error);
                log_with(deps.logger.as_deref(), |logger| {
                    logger.warn(
                        "assemble.file_skipped",
                        "Skipping file that could not be read",
                        log_fields([
                            ("label", label.clone()),
                            ("code", error.code.to_string()),
                        ]),
                    );
                });
                deps.descriptions.notify(&Notice::FileSkipped {
                    label: label.clone().into_boxed_str(),
                    reason: reason.clone(),
                });
                skipped.push(SkippedFile { label, reason });
                continue;
            },
        };

        section.clear();
        DocumentSection {
            description: &description,
            label: &label,
            content: &content,
        }
        .render_into(&mut section, input.fence_language);
        sink.write_chunk(&section)
            .map_err(|error| output_write_failed(error, input.output_path))?;
        written.push(label);
    }

    sink.finish()
        .map_err(|error| output_write_failed(error, input.output_path))?;

    log_with(deps.logger.as_deref(), |logger| {
        logger.info(
            "assemble.completed",
            "Document written",
            log_fields([
                (
                    "output_path",
                    serde_json::Value::from(input.output_path.display().to_string()),
                ),
                ("written", serde_json::Value::from(written.len())),
                ("skipped", serde_json::Value::from(skipped.len())),
            ]),
        );
    });

    Ok(AssembleDocumentOutput {
        output_path: input.output_path.to_path_buf(),
        written,
        skipped,
    })
}

fn open_output(filesystem: &dyn FileSystemPort, output_path: &Path) -> Result<Box<dyn DocumentSink>> {
    if let Some(parent) = output_path.parent() {
        filesystem
            .create_dir_all(parent)
            .map_err(|error| output_write_failed(error, output_path))?;
    }
    filesystem
        .create_document(output_path)
        .map_err(|error| output_write_failed(error, output_path))
}

/// Re-ask until the answer is non-blank.
fn request_description(provider: &dyn DescriptionProvider, label: &str) -> Result<Description> {
    let mut attempt = 1;
    loop {
        let answer = provider.describe(&DescriptionRequest { label, attempt })?;
        match Description::parse(&answer) {
            Ok(description) => return Ok(description),
            Err(_) => {
                provider.notify(&Notice::EmptyDescription {
                    label: label.into(),
                });
                attempt += 1;
            },
        }
    }
}

fn skip_reason(error: &ErrorEnvelope) -> SkipReason {
    if error.is_not_found() {
        SkipReason::Missing
    } else {
        SkipReason::Unreadable {
            message: error.message.clone().into_boxed_str(),
        }
    }
}

fn output_write_failed(error: ErrorEnvelope, output_path: &Path) -> ErrorEnvelope {
    if error.is_cancelled() {
        return error;
    }
    ErrorEnvelope::unexpected(
        ErrorCode::new("assemble", "output_write_failed"),
        format!("Failed to write to output file: {}", error.message),
    )
    .with_metadata("path", output_path.display().to_string())
    .with_metadata("cause", error.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Mutex;
    use stepdoc_adapters::LocalFileSystem;

    /// Answers from a queue and records every request and notice.
    #[derive(Default)]
    struct Scripted {
        answers: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<(String, u32)>>,
        notices: Mutex<Vec<Notice>>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().map(|answer| (*answer).to_owned()).collect()),
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<(String, u32)> {
            self.requests.lock().map(|items| items.clone()).unwrap_or_default()
        }

        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().map(|items| items.clone()).unwrap_or_default()
        }
    }

    impl DescriptionProvider for Scripted {
        fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push((request.label.to_owned(), request.attempt));
            }
            self.answers
                .lock()
                .ok()
                .and_then(|mut answers| answers.pop_front())
                .ok_or_else(|| ErrorEnvelope::cancelled("script exhausted"))
        }

        fn notify(&self, notice: &Notice) {
            if let Ok(mut notices) = self.notices.lock() {
                notices.push(notice.clone());
            }
        }
    }

    fn deps(descriptions: Arc<Scripted>) -> AssembleDocumentDeps {
        AssembleDocumentDeps {
            filesystem: Arc::new(LocalFileSystem::default()),
            descriptions,
            logger: None,
        }
    }

    #[test]
    fn sections_follow_file_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("repo");
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("a.ts"), "export const a = 1;\n\n\n")?;
        fs::write(root.join("src/page.tsx"), "export default function Page() {}")?;
        let files: MatchedFileList = [root.join("a.ts"), root.join("src/page.tsx")]
            .into_iter()
            .collect();
        let output_path = dir.path().join("out/3.md");

        let scripted = Arc::new(Scripted::new(&["  Create a  ", "Then the page"]));
        let output = assemble_document(
            &deps(Arc::clone(&scripted)),
            &AssembleDocumentInput {
                files: &files,
                output_path: &output_path,
                base_dir: &root,
                fence_language: "tsx",
            },
        )?;

        assert_eq!(output.written, vec!["a.ts", "src/page.tsx"]);
        assert!(output.skipped.is_empty());
        assert_eq!(
            fs::read_to_string(&output_path)?,
            "Create a\n\n```tsx file=\"a.ts\"\nexport const a = 1;\n```\n\n\
             Then the page\n\n```tsx file=\"src/page.tsx\"\nexport default function Page() {}\n```\n\n"
        );
        Ok(())
    }

    #[test]
    fn blank_descriptions_are_requested_again() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.ts"), "a")?;
        let files: MatchedFileList = std::iter::once(dir.path().join("a.ts")).collect();
        let output_path = dir.path().join("1.md");

        let scripted = Arc::new(Scripted::new(&["", "   ", "finally"]));
        assemble_document(
            &deps(Arc::clone(&scripted)),
            &AssembleDocumentInput {
                files: &files,
                output_path: &output_path,
                base_dir: dir.path(),
                fence_language: "tsx",
            },
        )?;

        let attempts: Vec<u32> = scripted.requests().into_iter().map(|(_, attempt)| attempt).collect();
        assert_eq!(attempts, vec![1, 2, 3]);
        let empty_notices = scripted
            .notices()
            .into_iter()
            .filter(|notice| matches!(notice, Notice::EmptyDescription { .. }))
            .count();
        assert_eq!(empty_notices, 2);
        assert!(fs::read_to_string(&output_path)?.starts_with("finally\n\n"));
        Ok(())
    }

    #[test]
    fn missing_and_unreadable_files_are_skipped() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("binary.ts"), [0xff_u8, 0xfe])?;
        fs::write(dir.path().join("ok.ts"), "ok")?;
        let files: MatchedFileList = [
            dir.path().join("gone.ts"),
            dir.path().join("binary.ts"),
            dir.path().join("ok.ts"),
        ]
        .into_iter()
        .collect();
        let output_path = dir.path().join("2.md");

        let scripted = Arc::new(Scripted::new(&["one", "two", "three"]));
        let output = assemble_document(
            &deps(Arc::clone(&scripted)),
            &AssembleDocumentInput {
                files: &files,
                output_path: &output_path,
                base_dir: dir.path(),
                fence_language: "tsx",
            },
        )?;

        assert_eq!(output.written, vec!["ok.ts"]);
        assert_eq!(output.skipped.len(), 2);
        assert_eq!(output.skipped[0].reason, SkipReason::Missing);
        assert!(matches!(output.skipped[1].reason, SkipReason::Unreadable { .. }));
        assert_eq!(
            fs::read_to_string(&output_path)?,
            "three\n\n```tsx file=\"ok.ts\"\nok\n```\n\n"
        );
        let skipped_notices = scripted
            .notices()
            .into_iter()
            .filter(|notice| matches!(notice, Notice::FileSkipped { .. }))
            .count();
        assert_eq!(skipped_notices, 2);
        Ok(())
    }

    #[test]
    fn unopenable_output_aborts_before_any_prompt() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.ts"), "a")?;
        fs::write(dir.path().join("blocker"), "not a directory")?;
        let files: MatchedFileList = std::iter::once(dir.path().join("a.ts")).collect();
        let output_path = dir.path().join("blocker/1.md");

        let scripted = Arc::new(Scripted::new(&["never used"]));
        let error = assemble_document(
            &deps(Arc::clone(&scripted)),
            &AssembleDocumentInput {
                files: &files,
                output_path: &output_path,
                base_dir: dir.path(),
                fence_language: "tsx",
            },
        )
        .err();

        assert_eq!(
            error.as_ref().map(|error| &error.code),
            Some(&ErrorCode::new("assemble", "output_write_failed"))
        );
        assert!(scripted.requests().is_empty());
        Ok(())
    }

    #[test]
    fn cancelled_prompt_stops_assembly() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.ts"), "a")?;
        let files: MatchedFileList = std::iter::once(dir.path().join("a.ts")).collect();

        let scripted = Arc::new(Scripted::new(&[]));
        let error = assemble_document(
            &deps(scripted),
            &AssembleDocumentInput {
                files: &files,
                output_path: &dir.path().join("1.md"),
                base_dir: dir.path(),
                fence_language: "tsx",
            },
        )
        .err();
        assert!(error.as_ref().is_some_and(ErrorEnvelope::is_cancelled));
        Ok(())
    }
}
