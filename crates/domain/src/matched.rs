//! Ordered, de-duplicated list of matched files.

use crate::paths::relative_label;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Absolute file paths in traversal order.
///
/// A path matched by more than one pattern keeps the position of its first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedFileList {
    files: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl MatchedFileList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already present. Returns true when appended.
    pub fn push(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.files.push(path);
        true
    }

    /// Returns true when `path` is in the list.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Iterate paths in order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Paths in order.
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }

    /// Display labels relative to `base`, in order.
    #[must_use]
    pub fn labels(&self, base: &Path) -> Vec<String> {
        self.files
            .iter()
            .map(|path| relative_label(path, base))
            .collect()
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<PathBuf> for MatchedFileList {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        let mut list = Self::new();
        for path in iter {
            list.push(path);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_first_position() {
        let mut list = MatchedFileList::new();
        assert!(list.push(PathBuf::from("/repo/b.tsx")));
        assert!(list.push(PathBuf::from("/repo/a.ts")));
        assert!(!list.push(PathBuf::from("/repo/b.tsx")));

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.as_slice(),
            &[PathBuf::from("/repo/b.tsx"), PathBuf::from("/repo/a.ts")]
        );
        assert!(list.contains(Path::new("/repo/a.ts")));
    }

    #[test]
    fn labels_are_relative_to_base() {
        let list: MatchedFileList = [
            PathBuf::from("/work/repo/a.ts"),
            PathBuf::from("/work/repo/app/page.tsx"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            list.labels(Path::new("/work")),
            vec!["repo/a.ts".to_owned(), "repo/app/page.tsx".to_owned()]
        );
    }
}
