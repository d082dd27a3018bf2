//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;
use std::path::Path;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for attaching context to failed results.
pub trait ResultExt<T> {
    /// Attach the path an operation was working on.
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach an arbitrary metadata entry to the error.
    fn with_context(self, key: &str, value: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ErrorEnvelope>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|error| {
            error
                .into()
                .with_metadata("path", path.display().to_string())
        })
    }

    fn with_context(self, key: &str, value: impl Into<String>) -> Result<T> {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::io;

    #[test]
    fn io_errors_gain_path_metadata() {
        let value: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let error = value.with_path(Path::new("/src/a.ts")).err();

        let error = error.unwrap_or_else(|| ErrorEnvelope::unexpected(ErrorCode::internal(), ""));
        assert!(error.is_not_found());
        assert_eq!(error.metadata_value("path"), Some("/src/a.ts"));
    }

    #[test]
    fn ok_values_pass_through() {
        let value: Result<i32> = Ok(3);
        assert!(matches!(value.with_context("step", "walk"), Ok(3)));
    }

    #[test]
    fn envelopes_keep_existing_metadata() {
        let value: Result<()> = Err(ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad")
            .with_metadata("field", "item"));
        let error = value.with_context("step", "prompt").err();

        let metadata = error.map(|error| error.metadata).unwrap_or_default();
        assert_eq!(metadata.get("field").map(String::as_str), Some("item"));
        assert_eq!(metadata.get("step").map(String::as_str), Some("prompt"));
    }
}
