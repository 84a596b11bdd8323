//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.write_atomic(&path, &content)
    ///     .with_path_context("write tree file", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Map an answer-source error; a closed input becomes `InputClosed`.
    fn or_input_closed(self) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn or_input_closed(self) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ApplicationError::InputClosed,
            _ => ApplicationError::OperationFailed {
                context: "read answer".to_string(),
                source: Box::new(e),
            },
        })
    }
}
