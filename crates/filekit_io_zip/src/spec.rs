//! Archive specification models and top-level error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Compression applied to entries added by the pack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPackCompression {
    /// Deflate compression (the container default).
    Deflated,
    /// Store entries uncompressed.
    Stored,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `pack_create` / `pack_append` / `pack_tree`.
#[derive(Debug, Clone)]
pub struct SpecPackOptions {
    /// Compression applied to added entries.
    pub rule_compression: EnumPackCompression,
}

impl Default for SpecPackOptions {
    fn default() -> Self {
        Self {
            rule_compression: EnumPackCompression::Deflated,
        }
    }
}

/// Input options for `unpack_archive`.
#[derive(Debug, Clone)]
pub struct SpecUnpackOptions {
    /// Restore entry modification times after extraction (best effort).
    pub if_keep_mtime: bool,
}

impl Default for SpecUnpackOptions {
    fn default() -> Self {
        Self { if_keep_mtime: true }
    }
}

/// One per-entry failure item with path/entry name + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecArchiveError {
    /// Source path or entry name that failed.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// "Top-level call failed" errors (container open/close stage).
///
/// Per-entry failures never appear here; they are collected into the
/// operation's report.
#[derive(Debug)]
pub enum ArchiveError {
    /// Archive file does not exist.
    ArchiveNotFound(PathBuf),
    /// Archive could not be opened or parsed.
    ArchiveOpenFailed {
        /// Archive path that failed to open.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Archive could not be finalized.
    ArchiveCloseFailed {
        /// Archive path that failed to close.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Walking the source tree failed (`pack_tree` only).
    SourceWalkFailed {
        /// Walk root that failed.
        path: PathBuf,
        /// Underlying walk error text.
        message: String,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArchiveNotFound(path) => {
                write!(f, "Archive does not exist: {}", path.display())
            }
            Self::ArchiveOpenFailed { path, message } => {
                write!(f, "Failed to open archive {}: {message}", path.display())
            }
            Self::ArchiveCloseFailed { path, message } => {
                write!(f, "Failed to finalize archive {}: {message}", path.display())
            }
            Self::SourceWalkFailed { path, message } => {
                write!(f, "Failed to walk source tree {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ArchiveError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
