//! Catalog loading errors
use groove_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file or music directory does not exist
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Path exists but is not what the provider expects
    #[error("Not a {expected}: {}", .path.display())]
    WrongKind {
        /// Offending path
        path: PathBuf,
        /// "file" or "directory"
        expected: &'static str,
    },

    /// Catalog document could not be parsed
    #[error("Invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// Loaded data violates catalog invariants
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Directory traversal error
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
