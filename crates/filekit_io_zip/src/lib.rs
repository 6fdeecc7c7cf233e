//! `filekit_io_zip` v1:
//! Rust-side ZIP archive packaging engine.
//!
//! Architecture:
//! - `pack`   : archive creation and append orchestration
//! - `unpack` : archive extraction orchestration
//! - `spec`   : enums/options/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod pack;
pub mod report;
pub mod spec;
pub mod unpack;
mod util;

#[cfg(test)]
pub(crate) mod testkit;

pub use pack::{pack_append, pack_create, pack_tree};
pub use report::{ReportArchive, ReportArchiveBuilder};
pub use spec::{
    ArchiveError, EnumPackCompression, SpecArchiveError, SpecPackOptions, SpecUnpackOptions,
};
pub use unpack::unpack_archive;
