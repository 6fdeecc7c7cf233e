//! Walk/write specification models and top-level error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// File-extension acceptance rule for the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumWalkExtensionFilter {
    /// Accept every file (the `"*"` wildcard token).
    Any,
    /// Accept files whose extension equals the given string exactly.
    ///
    /// The extension is the substring after the last `.` of the file name,
    /// compared case-sensitively and without a leading dot.
    Extension(String),
}

impl EnumWalkExtensionFilter {
    /// Parse a raw filter token: `"*"` means match-all, anything else is an
    /// exact extension (a leading dot is tolerated and stripped).
    pub fn from_raw(raw_filter: &str) -> Self {
        if raw_filter == "*" {
            return Self::Any;
        }
        Self::Extension(raw_filter.trim_start_matches('.').to_string())
    }

    /// Whether a file name passes this filter.
    pub fn is_match(&self, name_file: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Extension(c_ext) => match name_file.rsplit_once('.') {
                Some((_, c_ext_file)) => c_ext_file == c_ext,
                None => false,
            },
        }
    }
}

impl Default for EnumWalkExtensionFilter {
    fn default() -> Self {
        Self::Any
    }
}

/// Pattern matching mode for include/exclude basename lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumWalkPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Exact substring match.
    Literal,
}

/// Write-mode policy for raw file writes.
///
/// The mode is an explicit caller choice; existence of the target file never
/// changes the semantics of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumWriteMode {
    /// Truncate an existing file or create a fresh one.
    Overwrite,
    /// Append to an existing file or create a fresh one.
    Append,
    /// Create a fresh file; fail when the target already exists.
    CreateNew,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `walk_tree`.
#[derive(Debug, Clone)]
pub struct SpecWalkOptions {
    /// Extension acceptance rule applied to file names.
    pub filter_extension: EnumWalkExtensionFilter,
    /// Include patterns applied to file basenames.
    pub patterns_include_files: Option<Vec<String>>,
    /// Exclude patterns applied to file basenames.
    pub patterns_exclude_files: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumWalkPatternMode,
}

impl Default for SpecWalkOptions {
    fn default() -> Self {
        Self {
            filter_extension: EnumWalkExtensionFilter::Any,
            patterns_include_files: None,
            patterns_exclude_files: None,
            rule_pattern: EnumWalkPatternMode::Glob,
        }
    }
}

impl SpecWalkOptions {
    /// Options accepting only files with the given extension token
    /// (`"*"` or an exact extension).
    pub fn with_extension(raw_filter: &str) -> Self {
        Self {
            filter_extension: EnumWalkExtensionFilter::from_raw(raw_filter),
            ..Self::default()
        }
    }
}

/// One removal failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRemoveError {
    /// Path that failed to be removed.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// "Top-level call failed" errors for `walk_tree`.
#[derive(Debug)]
pub enum WalkTreeError {
    /// Root path does not exist or is not a directory.
    SourceNotDirectory(PathBuf),
    /// Root directory listing failed (permissions, IO).
    SourceNotReadable {
        /// Root path whose listing failed.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Invalid include/exclude pattern.
    InvalidPattern(String),
}

impl fmt::Display for WalkTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotDirectory(path) => {
                write!(f, "Walk root is not a directory: {}", path.display())
            }
            Self::SourceNotReadable { path, message } => {
                write!(f, "Failed to list walk root {}: {message}", path.display())
            }
            Self::InvalidPattern(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for WalkTreeError {}

/// Errors for `write_file`.
#[derive(Debug)]
pub enum WriteFileError {
    /// Target path is the empty string.
    EmptyPath,
    /// `EnumWriteMode::CreateNew` target already exists.
    AlreadyExists(PathBuf),
    /// Underlying open/write failure.
    WriteFailed {
        /// Target path of the failed write.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for WriteFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "Write target path is empty"),
            Self::AlreadyExists(path) => {
                write!(f, "Write target already exists: {}", path.display())
            }
            Self::WriteFailed { path, message } => {
                write!(f, "Failed to write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for WriteFileError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
