//! Error types for pdfscout.
//!
//! The scanning core itself cannot fail on data: any byte sequence is a valid
//! haystack. Everything that can go wrong is a precondition caught before any
//! bytes are searched (an empty keyword when a
//! [`Scanner`](crate::search::Scanner) is built, a global thread pool that
//! cannot be configured) or an I/O problem in the code that supplies the bytes.
//!
//! ```rust,ignore
//! match Scanner::new(config) {
//!     Ok(scanner) => scanner.scan(&bytes),
//!     Err(SearchError::EmptyPattern) => // keyword must not be empty,
//!     Err(e) => // configuration problem,
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while setting up or feeding a scan
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search pattern must not be empty")]
    EmptyPattern,
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an I/O error raised while opening `path` to the most specific variant
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
