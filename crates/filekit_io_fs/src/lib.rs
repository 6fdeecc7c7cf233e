//! `filekit_io_fs` v1:
//! Rust-side filesystem enumeration and write primitives.
//!
//! Architecture:
//! - `walk`   : recursive tree enumeration
//! - `write`  : directory/file mutation primitives
//! - `spec`   : enums/options/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod report;
pub mod spec;
pub mod walk;
pub mod write;
mod util;

#[cfg(test)]
pub(crate) mod testkit;

pub use report::{ReportRemove, ReportRemoveBuilder};
pub use spec::{
    EnumWalkExtensionFilter, EnumWalkPatternMode, EnumWriteMode, SpecRemoveError, SpecWalkOptions,
    WalkTreeError, WriteFileError,
};
pub use walk::walk_tree;
pub use write::{ensure_dir, remove_files, write_file};
