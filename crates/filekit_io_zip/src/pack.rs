//! Archive creation and append orchestration.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use filekit_io_fs::{SpecWalkOptions, walk_tree};

use crate::report::{ReportArchive, ReportArchiveBuilder};
use crate::spec::{ArchiveError, EnumPackCompression, SpecPackOptions};
use crate::util::derive_entry_name;

#[derive(Debug, Clone)]
struct SpecPackTaskEntry {
    path_file_src: PathBuf,
    name_entry: String,
}

/// Create `path_archive` (truncating any existing file) and add one entry per
/// path in `l_files`.
///
/// The stored name of each entry is exactly the supplied path string: no
/// deduplication and no relative-path rewriting. Callers wanting a
/// relocatable archive supply relative paths (or use [`pack_tree`]).
///
/// Per-entry failures (unreadable source, entry write error) are collected
/// into the returned report; the call itself fails only when the container
/// cannot be opened or finalized. The archive handle is released on every
/// exit path.
pub fn pack_create<P, Q>(
    path_archive: P,
    l_files: &[Q],
    spec_pack_options: SpecPackOptions,
) -> Result<ReportArchive, ArchiveError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_archive = path_archive.as_ref();
    let file_archive = File::create(path_archive).map_err(|e| ArchiveError::ArchiveOpenFailed {
        path: path_archive.to_path_buf(),
        message: e.to_string(),
    })?;
    let writer_zip = ZipWriter::new(file_archive);
    _pack_entries(
        writer_zip,
        path_archive,
        _derive_verbatim_tasks(l_files),
        &spec_pack_options,
    )
}

/// Add entries to an archive that already exists.
///
/// Identical to [`pack_create`] except that a missing archive fails with
/// [`ArchiveError::ArchiveNotFound`] instead of being created.
pub fn pack_append<P, Q>(
    path_archive: P,
    l_files: &[Q],
    spec_pack_options: SpecPackOptions,
) -> Result<ReportArchive, ArchiveError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_archive = path_archive.as_ref();
    if !path_archive.is_file() {
        return Err(ArchiveError::ArchiveNotFound(path_archive.to_path_buf()));
    }

    let file_archive = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path_archive)
        .map_err(|e| ArchiveError::ArchiveOpenFailed {
            path: path_archive.to_path_buf(),
            message: e.to_string(),
        })?;
    let writer_zip =
        ZipWriter::new_append(file_archive).map_err(|e| ArchiveError::ArchiveOpenFailed {
            path: path_archive.to_path_buf(),
            message: e.to_string(),
        })?;
    _pack_entries(
        writer_zip,
        path_archive,
        _derive_verbatim_tasks(l_files),
        &spec_pack_options,
    )
}

/// Walk `dir_root` and pack every accepted file into a new archive at
/// `path_archive`, storing entry names relative to `dir_root` with `/`
/// separators (a relocatable archive).
pub fn pack_tree<P, Q>(
    dir_root: P,
    path_archive: Q,
    spec_walk_options: SpecWalkOptions,
    spec_pack_options: SpecPackOptions,
) -> Result<ReportArchive, ArchiveError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let dir_root = dir_root.as_ref();
    let l_paths_file =
        walk_tree(dir_root, spec_walk_options).map_err(|e| ArchiveError::SourceWalkFailed {
            path: dir_root.to_path_buf(),
            message: e.to_string(),
        })?;

    let l_tasks = l_paths_file
        .into_iter()
        .map(|path_file_src| {
            let name_entry = match path_file_src.strip_prefix(dir_root) {
                Ok(path_rel) => derive_entry_name(path_rel),
                Err(_) => derive_entry_name(&path_file_src),
            };
            SpecPackTaskEntry {
                path_file_src,
                name_entry,
            }
        })
        .collect();

    let path_archive = path_archive.as_ref();
    let file_archive = File::create(path_archive).map_err(|e| ArchiveError::ArchiveOpenFailed {
        path: path_archive.to_path_buf(),
        message: e.to_string(),
    })?;
    _pack_entries(
        ZipWriter::new(file_archive),
        path_archive,
        l_tasks,
        &spec_pack_options,
    )
}

fn _derive_verbatim_tasks<Q>(l_files: &[Q]) -> Vec<SpecPackTaskEntry>
where
    Q: AsRef<Path>,
{
    l_files
        .iter()
        .map(|_path| {
            let path_file_src = _path.as_ref().to_path_buf();
            let name_entry = path_file_src.to_string_lossy().into_owned();
            SpecPackTaskEntry {
                path_file_src,
                name_entry,
            }
        })
        .collect()
}

fn _derive_entry_options(spec_pack_options: &SpecPackOptions) -> SimpleFileOptions {
    let method = match spec_pack_options.rule_compression {
        EnumPackCompression::Deflated => zip::CompressionMethod::Deflated,
        EnumPackCompression::Stored => zip::CompressionMethod::Stored,
    };
    SimpleFileOptions::default().compression_method(method)
}

fn _pack_entries(
    mut writer_zip: ZipWriter<File>,
    path_archive: &Path,
    l_tasks: Vec<SpecPackTaskEntry>,
    spec_pack_options: &SpecPackOptions,
) -> Result<ReportArchive, ArchiveError> {
    debug!(
        "Packing {} entries into {}",
        l_tasks.len(),
        path_archive.display()
    );
    let cfg_entry = _derive_entry_options(spec_pack_options);
    let mut builder_ar_report = ReportArchiveBuilder::default();

    for _task in l_tasks {
        builder_ar_report.add_requested();
        if _task.path_file_src.is_dir() {
            builder_ar_report.add_warning(format!(
                "Directory source skipped: {}",
                _task.path_file_src.display()
            ));
            builder_ar_report.add_skipped();
            continue;
        }
        match _add_entry(&mut writer_zip, &_task, &cfg_entry) {
            Ok(_) => builder_ar_report.add_completed(),
            Err(msg) => builder_ar_report.add_error(_task.path_file_src, msg),
        }
    }

    // finish() writes the central directory; the file handle is dropped here
    // on success and on error alike.
    writer_zip
        .finish()
        .map_err(|e| ArchiveError::ArchiveCloseFailed {
            path: path_archive.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(builder_ar_report.build())
}

fn _add_entry(
    writer_zip: &mut ZipWriter<File>,
    spec_task: &SpecPackTaskEntry,
    cfg_entry: &SimpleFileOptions,
) -> Result<(), String> {
    let mut file_src = File::open(&spec_task.path_file_src).map_err(|e| e.to_string())?;
    writer_zip
        .start_file(spec_task.name_entry.clone(), cfg_entry.clone())
        .map_err(|e| e.to_string())?;
    io::copy(&mut file_src, writer_zip).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::{pack_append, pack_create, pack_tree};
    use crate::spec::{ArchiveError, SpecPackOptions};
    use crate::testkit::{TestDir, write_text};
    use filekit_io_fs::SpecWalkOptions;

    fn read_entry_names(path_archive: &std::path::Path) -> Vec<String> {
        let archive_zip =
            zip::ZipArchive::new(File::open(path_archive).expect("open archive")).expect("parse");
        archive_zip.file_names().map(str::to_string).collect()
    }

    #[test]
    fn pack_create_stores_supplied_path_strings_verbatim() {
        let tmp = TestDir::new();
        let path_a = tmp.path().join("a.json");
        let path_b = tmp.path().join("b.txt");
        write_text(&path_a, "{\"k\":1}");
        write_text(&path_b, "b");

        let path_archive = tmp.path().join("out.zip");
        let report = pack_create(
            &path_archive,
            &[path_a.clone(), path_b.clone()],
            SpecPackOptions::default(),
        )
        .expect("pack create");

        assert_eq!(report.cnt_requested, 2);
        assert_eq!(report.cnt_completed, 2);
        assert_eq!(report.error_count(), 0);

        let mut l_names = read_entry_names(&path_archive);
        l_names.sort();
        let mut l_expected = vec![
            path_a.to_string_lossy().into_owned(),
            path_b.to_string_lossy().into_owned(),
        ];
        l_expected.sort();
        assert_eq!(l_names, l_expected);
    }

    #[test]
    fn pack_create_truncates_an_existing_archive() {
        let tmp = TestDir::new();
        let path_a = tmp.path().join("a.txt");
        let path_b = tmp.path().join("b.txt");
        write_text(&path_a, "a");
        write_text(&path_b, "b");

        let path_archive = tmp.path().join("out.zip");
        pack_create(&path_archive, &[path_a], SpecPackOptions::default()).expect("first pack");
        pack_create(&path_archive, &[path_b.clone()], SpecPackOptions::default())
            .expect("second pack");

        let l_names = read_entry_names(&path_archive);
        assert_eq!(l_names, vec![path_b.to_string_lossy().into_owned()]);
    }

    #[test]
    fn pack_create_collects_per_entry_errors_and_still_succeeds() {
        let tmp = TestDir::new();
        let path_good = tmp.path().join("good.txt");
        let path_missing = tmp.path().join("missing.txt");
        write_text(&path_good, "ok");

        let path_archive = tmp.path().join("out.zip");
        let report = pack_create(
            &path_archive,
            &[path_good, path_missing.clone()],
            SpecPackOptions::default(),
        )
        .expect("pack create");

        assert_eq!(report.cnt_requested, 2);
        assert_eq!(report.cnt_completed, 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].path, path_missing);
    }

    #[test]
    fn pack_create_skips_directory_sources_with_warning() {
        let tmp = TestDir::new();
        let path_dir = tmp.path().join("a_dir");
        std::fs::create_dir_all(&path_dir).expect("mkdir");

        let path_archive = tmp.path().join("out.zip");
        let report =
            pack_create(&path_archive, &[path_dir], SpecPackOptions::default()).expect("pack");

        assert_eq!(report.cnt_skipped, 1);
        assert_eq!(report.cnt_completed, 0);
        assert!(report.warning_count() >= 1);
    }

    #[test]
    fn pack_create_with_empty_file_list_writes_empty_archive() {
        let tmp = TestDir::new();
        let path_archive = tmp.path().join("out.zip");
        let l_files: Vec<std::path::PathBuf> = Vec::new();

        let report =
            pack_create(&path_archive, &l_files, SpecPackOptions::default()).expect("pack");
        assert_eq!(report.cnt_requested, 0);
        assert!(read_entry_names(&path_archive).is_empty());
    }

    #[test]
    fn pack_append_requires_an_existing_archive() {
        let tmp = TestDir::new();
        let path_archive = tmp.path().join("missing.zip");
        let l_files: Vec<std::path::PathBuf> = Vec::new();

        let err = pack_append(&path_archive, &l_files, SpecPackOptions::default())
            .expect_err("must fail");
        assert!(matches!(err, ArchiveError::ArchiveNotFound(_)));
    }

    #[test]
    fn pack_append_adds_to_existing_entries() {
        let tmp = TestDir::new();
        let path_a = tmp.path().join("a.txt");
        let path_b = tmp.path().join("b.txt");
        write_text(&path_a, "a");
        write_text(&path_b, "b");

        let path_archive = tmp.path().join("out.zip");
        pack_create(&path_archive, &[path_a.clone()], SpecPackOptions::default())
            .expect("pack create");
        let report = pack_append(&path_archive, &[path_b.clone()], SpecPackOptions::default())
            .expect("pack append");
        assert_eq!(report.cnt_completed, 1);

        let mut l_names = read_entry_names(&path_archive);
        l_names.sort();
        let mut l_expected = vec![
            path_a.to_string_lossy().into_owned(),
            path_b.to_string_lossy().into_owned(),
        ];
        l_expected.sort();
        assert_eq!(l_names, l_expected);
    }

    #[test]
    fn pack_tree_stores_root_relative_names() {
        let tmp = TestDir::new();
        let dir_src = tmp.path().join("src");
        write_text(&dir_src.join("root.txt"), "root");
        write_text(&dir_src.join("sub/inner.txt"), "inner");

        let path_archive = tmp.path().join("tree.zip");
        let report = pack_tree(
            &dir_src,
            &path_archive,
            SpecWalkOptions::default(),
            SpecPackOptions::default(),
        )
        .expect("pack tree");
        assert_eq!(report.cnt_completed, 2);

        let mut l_names = read_entry_names(&path_archive);
        l_names.sort();
        assert_eq!(l_names, vec!["root.txt", "sub/inner.txt"]);
    }

    #[test]
    fn pack_tree_missing_root_maps_to_walk_failure() {
        let tmp = TestDir::new();
        let err = pack_tree(
            tmp.path().join("no_such_dir"),
            tmp.path().join("tree.zip"),
            SpecWalkOptions::default(),
            SpecPackOptions::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, ArchiveError::SourceWalkFailed { .. }));
    }
}
