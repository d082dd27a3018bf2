//! Interactive walkthrough E2E tests driving the binary over stdin.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_session(dir: &Path, args: &[&str], stdin: &str) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stepdoc"));
    command
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, _) in std::env::vars() {
        if key.starts_with("STEPDOC_") {
            command.env_remove(key);
        }
    }

    let mut child = command.spawn()?;
    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes())?;
    }
    child.wait_with_output()
}

fn write(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

fn sample_repo(dir: &Path) -> io::Result<()> {
    let repo = dir.join("repo");
    write(&repo.join("app/page.tsx"), "export default function Page() {}\n\n")?;
    write(&repo.join("lib/utils.ts"), "export const sum = (a: number, b: number) => a + b;\n")?;
    write(&repo.join("components/ui/button.tsx"), "ui")?;
    write(&repo.join("node_modules/dep/index.ts"), "dep")?;
    write(&repo.join("next.config.ts"), "config")?;
    write(&repo.join("README.md"), "# readme")?;
    Ok(())
}

#[test]
fn interactive_session_writes_walkthrough() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;

    let output = run_session(
        dir.path(),
        &[],
        "repo\n42\ny\nRender the page\n\n  Add helpers  \n",
    )?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "session failed: {stderr}");
    assert!(stdout.contains("Repo directory path: "));
    assert!(stdout.contains("Item number: "));
    assert!(stdout.contains("- app/page.tsx\n- lib/utils.ts\n"));
    assert!(!stdout.contains("button.tsx"));
    assert!(stdout.contains("File: lib/utils.ts"));
    assert!(stdout.contains("Description cannot be empty. Please try again."));
    assert!(stdout.contains("Output saved to"));

    let document = std::fs::read_to_string(dir.path().join("markdown-outputs/42.md"))?;
    assert_eq!(
        document,
        "Render the page\n\n```tsx file=\"app/page.tsx\"\nexport default function Page() {}\n```\n\n\
         Add helpers\n\n```tsx file=\"lib/utils.ts\"\nexport const sum = (a: number, b: number) => a + b;\n```\n\n"
    );
    Ok(())
}

#[test]
fn declining_writes_nothing() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;

    let output = run_session(dir.path(), &[], "repo\n1\nn\n")?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Operation cancelled."));
    assert!(!stdout.contains("Short message"));
    assert!(!dir.path().join("markdown-outputs/1.md").exists());
    Ok(())
}

#[test]
fn missing_root_is_reported() -> io::Result<()> {
    let dir = tempfile::tempdir()?;

    let output = run_session(dir.path(), &[], "does-not-exist\n")?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Error: The directory"));
    assert!(stdout.contains("does not exist."));
    assert!(!stdout.contains("Item number"));
    Ok(())
}

#[test]
fn empty_tree_reports_no_matches() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    write(&dir.path().join("repo/README.md"), "# readme")?;

    let output = run_session(dir.path(), &[], "repo\n1\n")?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("No files matching *.ts, *.tsx found in the specified directory."));
    assert!(!dir.path().join("markdown-outputs").exists());
    Ok(())
}

#[test]
fn closed_stdin_cancels() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;

    let output = run_session(dir.path(), &[], "repo\n")?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(130));
    assert!(stdout.contains("Operation cancelled."));
    Ok(())
}

#[test]
fn flags_pre_answer_prompts() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;

    let output = run_session(
        dir.path(),
        &["--root", "repo", "--item", "7", "--yes", "--output-dir", "docs"],
        "one\ntwo\n",
    )?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "session failed: {stderr}");
    assert!(!stdout.contains("Repo directory path"));
    assert!(!stdout.contains("Do you want to continue"));
    let document = std::fs::read_to_string(dir.path().join("docs/7.md"))?;
    assert!(document.starts_with("one\n\n```tsx file=\"app/page.tsx\"\n"));
    Ok(())
}

#[test]
fn invalid_item_number_exits_with_invalid_input() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;

    let output = run_session(dir.path(), &["--root", "repo"], "../escape\n")?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("domain:invalid_item_number"), "{stderr}");
    Ok(())
}

#[test]
fn unwritable_output_exits_with_io_error() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    sample_repo(dir.path())?;
    write(&dir.path().join("blocker"), "not a directory")?;

    let output = run_session(
        dir.path(),
        &["--root", "repo", "--item", "1", "--yes", "--output-dir", "blocker"],
        "one\ntwo\n",
    )?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr.contains("assemble:output_write_failed"), "{stderr}");
    Ok(())
}
