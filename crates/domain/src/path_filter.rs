//! Directory and file exclusion rules.
//!
//! Directory rules exclude whole subtrees: a candidate is ignored when an
//! ignored entry is a component-wise prefix of it, so `foo` never shadows a
//! sibling named `foo2`. File rules are exact absolute-path matches.

use crate::paths::{absolutize, normalize_lexically};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Absolute directory prefixes whose subtrees are excluded from traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredDirectories {
    entries: Vec<PathBuf>,
}

impl IgnoredDirectories {
    /// Resolve configured entries relative to `root`.
    ///
    /// Blank entries are dropped and duplicates collapse.
    #[must_use]
    pub fn resolve<I, S>(root: &Path, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_paths(resolve_entries(root, entries))
    }

    /// Build from paths that are already absolute.
    #[must_use]
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut entries: Vec<PathBuf> = paths
            .into_iter()
            .map(|path| normalize_lexically(&path))
            .collect();
        entries.sort();
        entries.dedup();
        Self { entries }
    }

    /// Iterate over the resolved entries.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is ignored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Absolute file paths excluded by exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredFiles {
    entries: BTreeSet<PathBuf>,
}

impl IgnoredFiles {
    /// Resolve configured entries relative to `root`.
    #[must_use]
    pub fn resolve<I, S>(root: &Path, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_paths(resolve_entries(root, entries))
    }

    /// Build from paths that are already absolute.
    #[must_use]
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            entries: paths
                .into_iter()
                .map(|path| normalize_lexically(&path))
                .collect(),
        }
    }

    /// Iterate over the resolved entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is ignored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_entries<I, S>(root: &Path, entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            (!trimmed.is_empty()).then(|| absolutize(Path::new(trimmed), root))
        })
        .collect()
}

/// Returns true when `path` equals or lies beneath an ignored directory.
#[must_use]
pub fn is_ignored_directory(path: &Path, ignored: &IgnoredDirectories) -> bool {
    if ignored.is_empty() {
        return false;
    }
    let candidate = normalize_lexically(path);
    ignored.iter().any(|entry| candidate.starts_with(entry))
}

/// Returns true when `path` is exactly one of the ignored files.
#[must_use]
pub fn is_ignored_file(path: &Path, ignored: &IgnoredFiles) -> bool {
    if ignored.is_empty() {
        return false;
    }
    ignored.entries.contains(&normalize_lexically(path))
}
