//! `filekit_io_json` v1:
//! Rust-side JSON document store.
//!
//! Architecture:
//! - `store` : document load/save engine
//! - `spec`  : error types

pub mod spec;
pub mod store;

#[cfg(test)]
pub(crate) mod testkit;

pub use spec::DocumentError;
pub use store::{load_document, load_document_as, save_document};
