//! Config-driven walkthrough E2E tests.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_cli(dir: &Path, args: &[&str], envs: &[(&str, &str)], stdin: &str) -> io::Result<Output> {
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
    command.envs(envs.iter().copied());

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

const RUST_CONFIG: &str = r#"
version = 1

[scan]
patterns = ["*.rs"]
ignoredDirectories = ["target"]
ignoredFiles = ["build.rs"]

[output]
directory = "walkthroughs"
fenceLanguage = "rust"
"#;

#[test]
fn config_file_drives_patterns_and_fence() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let crate_dir = dir.path().join("crate");
    write(&crate_dir.join("src/main.rs"), "fn main() {}\n")?;
    write(&crate_dir.join("build.rs"), "fn main() {}\n")?;
    write(&crate_dir.join("target/debug/gen.rs"), "// generated\n")?;
    write(&crate_dir.join("web/index.ts"), "export {};\n")?;
    let config = dir.path().join("stepdoc.toml");
    write(&config, RUST_CONFIG)?;

    let output = run_cli(
        dir.path(),
        &[
            "--config",
            config.to_string_lossy().as_ref(),
            "--root",
            "crate",
            "--item",
            "rust-1",
            "--yes",
        ],
        &[],
        "Entry point\n",
    )?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "session failed: {stderr}");
    let document = std::fs::read_to_string(dir.path().join("walkthroughs/rust-1.md"))?;
    assert_eq!(
        document,
        "Entry point\n\n```rust file=\"src/main.rs\"\nfn main() {}\n```\n\n"
    );
    Ok(())
}

#[test]
fn env_overrides_config_file() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let crate_dir = dir.path().join("crate");
    write(&crate_dir.join("src/main.rs"), "fn main() {}\n")?;
    write(&crate_dir.join("Cargo.toml"), "[package]\n")?;
    let config = dir.path().join("stepdoc.toml");
    write(&config, RUST_CONFIG)?;

    let output = run_cli(
        dir.path(),
        &[
            "--config",
            config.to_string_lossy().as_ref(),
            "--root",
            "crate",
            "--item",
            "2",
            "--yes",
        ],
        &[
            ("STEPDOC_PATTERNS", "*.toml"),
            ("STEPDOC_FENCE_LANGUAGE", "toml"),
            ("STEPDOC_OUTPUT_EXTENSION", "txt"),
        ],
        "Manifest\n",
    )?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "session failed: {stderr}");
    let document = std::fs::read_to_string(dir.path().join("walkthroughs/2.txt"))?;
    assert_eq!(
        document,
        "Manifest\n\n```toml file=\"Cargo.toml\"\n[package]\n```\n\n"
    );
    Ok(())
}

#[test]
fn unsupported_config_version_is_rejected() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("stepdoc.json");
    write(&config, r#"{"version": 9}"#)?;

    let output = run_cli(
        dir.path(),
        &["--config", config.to_string_lossy().as_ref()],
        &[],
        "",
    )?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("config:unsupported_version"), "{stderr}");
    assert!(!stdout.contains("Repo directory path"));
    Ok(())
}
