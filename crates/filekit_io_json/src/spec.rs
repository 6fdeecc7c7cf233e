//! Document store error types.

use std::fmt;
use std::path::PathBuf;

/// Errors for `load_document` / `save_document`.
#[derive(Debug)]
pub enum DocumentError {
    /// Source file does not exist.
    NotFound(PathBuf),
    /// Source text is not a valid document.
    DecodeFailed {
        /// Source path whose content failed to parse.
        path: PathBuf,
        /// Underlying decode error text.
        message: String,
    },
    /// Document value could not be serialized.
    EncodeFailed(String),
    /// Underlying read failure other than a missing file.
    ReadFailed {
        /// Source path of the failed read.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Underlying write failure.
    WriteFailed {
        /// Target path of the failed write.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Document does not exist: {}", path.display()),
            Self::DecodeFailed { path, message } => {
                write!(f, "Failed to decode document {}: {message}", path.display())
            }
            Self::EncodeFailed(msg) => write!(f, "Failed to encode document: {msg}"),
            Self::ReadFailed { path, message } => {
                write!(f, "Failed to read document {}: {message}", path.display())
            }
            Self::WriteFailed { path, message } => {
                write!(f, "Failed to write document {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for DocumentError {}
