//! Integration coverage for combining patterns with ignore rules.

use std::path::Path;
use stepdoc_domain::{
    FilePatterns, IgnoredDirectories, IgnoredFiles, PatternError, PrimitiveError,
    is_ignored_directory, is_ignored_file,
};
use stepdoc_shared::ErrorEnvelope;

const DEFAULT_DIRS: [&str; 3] = ["node_modules", "dist", "components/ui"];
const DEFAULT_FILES: [&str; 7] = [
    "next-env.d.ts",
    "next.config.ts",
    "tailwind.config.ts",
    "postcss.config.ts",
    "tsconfig.json",
    "tsconfig.node.json",
    "tsconfig.app.json",
];

#[test]
fn default_web_rules_select_only_source_files() -> Result<(), PatternError> {
    let root = Path::new("/work/app");
    let patterns = FilePatterns::parse(["*.ts", "*.tsx"])?;
    let dirs = IgnoredDirectories::resolve(root, DEFAULT_DIRS);
    let files = IgnoredFiles::resolve(root, DEFAULT_FILES);

    let candidates = [
        ("/work/app/a.ts", true),
        ("/work/app/next.config.ts", false),
        ("/work/app/node_modules/b.ts", false),
        ("/work/app/components/ui/c.tsx", false),
        ("/work/app/components/nav.tsx", true),
        ("/work/app/src/next.config.ts", true),
        ("/work/app/tsconfig.json", false),
        ("/work/app/readme.md", false),
    ];

    for (candidate, expected) in candidates {
        let path = Path::new(candidate);
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let parent = path.parent().unwrap_or(root);
        let selected = patterns.matches_any(name)
            && !is_ignored_file(path, &files)
            && !is_ignored_directory(parent, &dirs);
        assert_eq!(selected, expected, "{candidate}");
    }

    Ok(())
}

#[test]
fn absolute_ignore_entries_are_kept_as_is() {
    let dirs = IgnoredDirectories::resolve(Path::new("/work/app"), ["/opt/vendor"]);
    assert!(is_ignored_directory(Path::new("/opt/vendor/lib"), &dirs));
    assert!(!is_ignored_directory(
        Path::new("/work/app/opt/vendor"),
        &dirs
    ));
}

#[test]
fn primitive_errors_map_into_error_envelopes() {
    let envelope: ErrorEnvelope = PrimitiveError::EmptyItemNumber { input_length: 2 }.into();
    assert_eq!(envelope.code.namespace(), "domain");
    assert_eq!(envelope.code.code(), "invalid_item_number");
    assert_eq!(envelope.metadata_value("input_length"), Some("2"));
}
