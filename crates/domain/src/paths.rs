//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths are normalized by removing `.`
//! segments and folding `..` into their parent, the same way an absolute path
//! is normalized before it is compared against ignore lists.

use std::path::{Component, Path, PathBuf};

/// Normalize a path without consulting the filesystem.
///
/// `..` above the root is dropped for absolute paths and kept for relative ones.
/// An empty result becomes `.`.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {},
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                },
                Some(Component::RootDir | Component::Prefix(_)) => {},
                Some(Component::ParentDir | Component::CurDir) | None => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Resolve `path` against `base` and normalize the result.
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Render `path` relative to `base` using `/` separators.
///
/// Paths outside `base` are expressed with leading `..` segments.
#[must_use]
pub fn relative_label(path: &Path, base: &Path) -> String {
    let path = normalize_lexically(path);
    let base = normalize_lexically(base);
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(left, right)| left == right)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        segments.push("..".to_owned());
    }
    for component in path_parts.iter().skip(common) {
        if matches!(component, Component::CurDir) {
            continue;
        }
        segments.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        ".".to_owned()
    } else {
        segments.join("/")
    }
}
