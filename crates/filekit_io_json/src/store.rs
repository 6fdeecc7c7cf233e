//! Document load/save engine.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use filekit_io_fs::ensure_dir;

use crate::spec::DocumentError;

/// Load a generic document tree from a UTF-8 JSON text file.
pub fn load_document<P>(path_file: P) -> Result<Value, DocumentError>
where
    P: AsRef<Path>,
{
    load_document_as(path_file)
}

/// Load a document and deserialize it into a caller-chosen type.
pub fn load_document_as<P, T>(path_file: P) -> Result<T, DocumentError>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path_file = path_file.as_ref();
    let txt_document = fs::read_to_string(path_file).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            DocumentError::NotFound(path_file.to_path_buf())
        } else {
            DocumentError::ReadFailed {
                path: path_file.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;
    serde_json::from_str(&txt_document).map_err(|e| DocumentError::DecodeFailed {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize `document` pretty-printed and write it to `path_file`.
///
/// The output is indented, human-readable UTF-8 with non-ASCII text written
/// literally, never escaped to numeric code points. The parent directory is
/// materialized first. The write is a direct overwrite, not atomic: a crash
/// mid-write can leave a truncated file.
pub fn save_document<P, T>(path_file: P, document: &T) -> Result<(), DocumentError>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path_file = path_file.as_ref();
    let txt_document = serde_json::to_string_pretty(document)
        .map_err(|e| DocumentError::EncodeFailed(e.to_string()))?;

    if let Some(path_parent) = path_file.parent()
        && !path_parent.as_os_str().is_empty()
    {
        ensure_dir(path_parent);
    }
    fs::write(path_file, txt_document).map_err(|e| DocumentError::WriteFailed {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("Document saved to {}", path_file.display());
    Ok(())
}
