//! Glob-style file name patterns.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};
use thiserror::Error;

/// Pattern compilation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern is blank after trimming.
    #[error("file pattern must be non-empty")]
    Empty,
    /// Pattern is not valid glob syntax.
    #[error("invalid file pattern `{pattern}`: {reason}")]
    Invalid {
        /// Offending pattern text.
        pattern: String,
        /// Parser message.
        reason: String,
    },
}

impl From<PatternError> for ErrorEnvelope {
    fn from(error: PatternError) -> Self {
        let envelope = Self::expected(ErrorCode::new("domain", "invalid_pattern"), error.to_string());
        match error {
            PatternError::Empty => envelope,
            PatternError::Invalid { pattern, .. } => envelope.with_metadata("pattern", pattern),
        }
    }
}

/// A single compiled file name pattern such as `*.tsx`.
///
/// `*` and `?` never cross a path separator; patterns are matched against the
/// bare file name.
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: Box<str>,
    matcher: GlobMatcher,
}

impl FilePattern {
    /// Compile a pattern.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PatternError::Empty);
        }
        let glob = GlobBuilder::new(trimmed)
            .literal_separator(true)
            .build()
            .map_err(|error| PatternError::Invalid {
                pattern: trimmed.to_owned(),
                reason: error.kind().to_string(),
            })?;
        Ok(Self {
            raw: trimmed.into(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Pattern text as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true when `file_name` matches. Names that are not valid UTF-8
    /// are matched on their raw bytes.
    #[must_use]
    pub fn matches<P: AsRef<Path> + ?Sized>(&self, file_name: &P) -> bool {
        self.matcher.is_match(file_name)
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for FilePattern {}

/// Ordered set of file patterns; a file matches if any pattern matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatterns {
    patterns: Vec<FilePattern>,
}

impl FilePatterns {
    /// Compile patterns in order, dropping exact duplicates.
    pub fn parse<I, S>(raw: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<FilePattern> = Vec::new();
        for entry in raw {
            let pattern = FilePattern::parse(entry.as_ref())?;
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    /// Iterate patterns in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilePattern> {
        self.patterns.iter()
    }

    /// Returns true when any pattern matches `file_name`.
    #[must_use]
    pub fn matches_any<P: AsRef<Path> + ?Sized>(&self, file_name: &P) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(file_name))
    }

    /// Number of patterns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true when there are no patterns (nothing matches).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilePatterns {
    type Item = &'a FilePattern;
    type IntoIter = std::slice::Iter<'a, FilePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typescript_patterns_match_by_extension() -> Result<(), PatternError> {
        let patterns = FilePatterns::parse(["*.ts", "*.tsx"])?;
        assert!(patterns.matches_any("page.tsx"));
        assert!(patterns.matches_any("util.ts"));
        assert!(patterns.matches_any("next-env.d.ts"));
        assert!(!patterns.matches_any("style.css"));
        assert!(!patterns.matches_any("types.ts.map"));
        Ok(())
    }

    #[test]
    fn star_matches_leading_dot_names() -> Result<(), PatternError> {
        let pattern = FilePattern::parse("*.ts")?;
        assert!(pattern.matches(".eslintrc.ts"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_match_on_raw_bytes() -> Result<(), PatternError> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let patterns = FilePatterns::parse(["*.ts"])?;
        assert!(patterns.matches_any(OsStr::from_bytes(b"f\xfe.ts")));
        assert!(!patterns.matches_any(OsStr::from_bytes(b"f\xfe.rs")));
        Ok(())
    }

    #[test]
    fn character_classes_and_single_wildcards() -> Result<(), PatternError> {
        let patterns = FilePatterns::parse(["file?.[jt]s"])?;
        assert!(patterns.matches_any("file1.js"));
        assert!(patterns.matches_any("fileA.ts"));
        assert!(!patterns.matches_any("file10.ts"));
        Ok(())
    }

    #[test]
    fn duplicates_collapse_and_order_is_kept() -> Result<(), PatternError> {
        let patterns = FilePatterns::parse(["*.tsx", " *.ts ", "*.tsx"])?;
        let raw: Vec<&str> = patterns.iter().map(FilePattern::as_str).collect();
        assert_eq!(raw, vec!["*.tsx", "*.ts"]);
        Ok(())
    }

    #[test]
    fn invalid_patterns_surface_as_envelopes() {
        let error = FilePatterns::parse(["[unclosed"]).err();
        assert!(matches!(error, Some(PatternError::Invalid { .. })));

        let envelope: Option<ErrorEnvelope> = error.map(Into::into);
        assert_eq!(
            envelope.as_ref().map(|envelope| envelope.code.code()),
            Some("invalid_pattern")
        );
        assert_eq!(
            envelope
                .as_ref()
                .and_then(|envelope| envelope.metadata_value("pattern")),
            Some("[unclosed")
        );

        assert_eq!(FilePattern::parse("  ").err(), Some(PatternError::Empty));
    }
}
