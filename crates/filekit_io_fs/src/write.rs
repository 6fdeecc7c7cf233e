//! Directory materialization and raw file write primitives.

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::report::{ReportRemove, ReportRemoveBuilder};
use crate::spec::{EnumWriteMode, WriteFileError};

/// Materialize `path_dir` together with all missing ancestor directories,
/// using the platform's permissive default permissions (subject to umask).
///
/// Creation is attempted first and "already exists" is tolerated, so the
/// call is idempotent and safe under concurrent callers targeting the same
/// path. An existing file at `path_dir` is treated as "already exists" too.
///
/// Never fails observably: creation failures are swallowed after a warning.
/// Callers that must know whether the location is writable use the write
/// operations that propagate IO errors.
pub fn ensure_dir<P>(path_dir: P)
where
    P: AsRef<Path>,
{
    let path_dir = path_dir.as_ref();
    if let Err(e) = fs::create_dir_all(path_dir)
        && e.kind() != io::ErrorKind::AlreadyExists
    {
        warn!(
            "Failed to materialize directory {} ({e})",
            path_dir.display()
        );
    }
}

/// Write `raw_content` to `path_file` under an explicit write mode.
///
/// The parent directory is materialized first (see [`ensure_dir`]).
/// [`EnumWriteMode::Overwrite`] truncates or creates, [`EnumWriteMode::Append`]
/// appends or creates, and [`EnumWriteMode::CreateNew`] fails with
/// [`WriteFileError::AlreadyExists`] when the target is present.
pub fn write_file<P>(
    path_file: P,
    raw_content: &[u8],
    rule_write: EnumWriteMode,
) -> Result<(), WriteFileError>
where
    P: AsRef<Path>,
{
    let path_file = path_file.as_ref();
    if path_file.as_os_str().is_empty() {
        return Err(WriteFileError::EmptyPath);
    }
    if let Some(path_parent) = path_file.parent()
        && !path_parent.as_os_str().is_empty()
    {
        ensure_dir(path_parent);
    }

    let mut cfg_open = fs::OpenOptions::new();
    match rule_write {
        EnumWriteMode::Overwrite => cfg_open.write(true).create(true).truncate(true),
        EnumWriteMode::Append => cfg_open.append(true).create(true),
        EnumWriteMode::CreateNew => cfg_open.write(true).create_new(true),
    };

    let mut file_out = cfg_open.open(path_file).map_err(|e| {
        if rule_write == EnumWriteMode::CreateNew && e.kind() == io::ErrorKind::AlreadyExists {
            WriteFileError::AlreadyExists(path_file.to_path_buf())
        } else {
            WriteFileError::WriteFailed {
                path: path_file.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;
    file_out
        .write_all(raw_content)
        .map_err(|e| WriteFileError::WriteFailed {
            path: path_file.to_path_buf(),
            message: e.to_string(),
        })
}

/// Best-effort batch removal of regular files.
///
/// Paths that do not exist are counted as missing rather than failing; paths
/// that exist but cannot be removed become per-entry report errors. The call
/// itself never fails.
pub fn remove_files<P>(l_paths_file: &[P]) -> ReportRemove
where
    P: AsRef<Path>,
{
    let mut builder_rm_report = ReportRemoveBuilder::default();

    for _path in l_paths_file {
        let path_file = _path.as_ref();
        builder_rm_report.add_requested();
        match fs::remove_file(path_file) {
            Ok(_) => builder_rm_report.add_removed(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => builder_rm_report.add_missing(),
            Err(e) => builder_rm_report.add_error(path_file.to_path_buf(), e.to_string()),
        }
    }

    builder_rm_report.build()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{ensure_dir, remove_files, write_file};
    use crate::spec::{EnumWriteMode, WriteFileError};
    use crate::testkit::{TestDir, write_text};

    #[test]
    fn ensure_dir_creates_all_missing_ancestors() {
        let tmp = TestDir::new();
        let path_deep = tmp.path().join("a/b/c");

        ensure_dir(&path_deep);
        assert!(path_deep.is_dir());
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = TestDir::new();
        let path_dir = tmp.path().join("again");

        ensure_dir(&path_dir);
        ensure_dir(&path_dir);
        assert!(path_dir.is_dir());
    }

    #[test]
    fn ensure_dir_tolerates_existing_file_at_target() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("occupied");
        write_text(&path_file, "x");

        ensure_dir(&path_file);
        assert!(path_file.is_file());
    }

    #[test]
    fn write_file_overwrite_then_append_concatenates() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("f.txt");

        write_file(&path_file, b"hello", EnumWriteMode::Overwrite).expect("first write");
        write_file(&path_file, b"world", EnumWriteMode::Append).expect("second write");
        assert_eq!(fs::read_to_string(&path_file).expect("read"), "helloworld");
    }

    #[test]
    fn write_file_overwrite_truncates_previous_content() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("f.txt");

        write_file(&path_file, b"long initial content", EnumWriteMode::Overwrite)
            .expect("first write");
        write_file(&path_file, b"short", EnumWriteMode::Overwrite).expect("second write");
        assert_eq!(fs::read_to_string(&path_file).expect("read"), "short");
    }

    #[test]
    fn write_file_create_new_rejects_existing_target() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("f.txt");
        write_text(&path_file, "present");

        let err = write_file(&path_file, b"x", EnumWriteMode::CreateNew).expect_err("must fail");
        assert!(matches!(err, WriteFileError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path_file).expect("read"), "present");
    }

    #[test]
    fn write_file_materializes_parent_directories() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("deep/nested/f.bin");

        write_file(&path_file, &[0_u8, 1, 2], EnumWriteMode::Overwrite).expect("write");
        assert_eq!(fs::read(&path_file).expect("read"), vec![0_u8, 1, 2]);
    }

    #[test]
    fn write_file_empty_path_rejected() {
        let err =
            write_file(PathBuf::new(), b"x", EnumWriteMode::Overwrite).expect_err("must fail");
        assert!(matches!(err, WriteFileError::EmptyPath));
    }

    #[test]
    fn remove_files_skips_missing_and_removes_existing() {
        let tmp = TestDir::new();
        let path_present = tmp.path().join("present.txt");
        let path_missing = tmp.path().join("missing.txt");
        write_text(&path_present, "x");

        let report = remove_files(&[path_present.clone(), path_missing]);
        assert_eq!(report.cnt_requested, 2);
        assert_eq!(report.cnt_removed, 1);
        assert_eq!(report.cnt_missing, 1);
        assert_eq!(report.error_count(), 0);
        assert!(!path_present.exists());
    }

    #[test]
    fn remove_files_reports_per_entry_errors() {
        let tmp = TestDir::new();
        let path_dir = tmp.path().join("a_directory");
        ensure_dir(&path_dir);

        let report = remove_files(&[path_dir.clone()]);
        assert_eq!(report.cnt_requested, 1);
        assert_eq!(report.cnt_removed, 0);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].path, path_dir);
    }
}
