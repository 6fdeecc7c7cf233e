//! Archive extraction orchestration.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tracing::debug;

use filekit_io_fs::ensure_dir;

use crate::report::{ReportArchive, ReportArchiveBuilder};
use crate::spec::{ArchiveError, SpecUnpackOptions};
use crate::util::{open_archive_reader, unix_seconds_from_civil};

/// Extract every entry of `path_archive` under `dir_dest`, preserving each
/// entry's stored relative path.
///
/// `dir_dest` is materialized first. Entries whose stored names would escape
/// the destination root (absolute names, `..` traversal) are rejected
/// per-entry and recorded in the report; extraction of the remaining entries
/// continues. Directory entries materialize directories. Entry modification
/// times are restored best-effort when
/// [`SpecUnpackOptions::if_keep_mtime`] is set.
///
/// Fails only when the archive is missing or cannot be opened/parsed; the
/// archive handle is released on every exit path.
pub fn unpack_archive<P, Q>(
    path_archive: P,
    dir_dest: Q,
    spec_unpack_options: SpecUnpackOptions,
) -> Result<ReportArchive, ArchiveError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_archive = path_archive.as_ref();
    let dir_dest = dir_dest.as_ref();

    let mut archive_zip = open_archive_reader(path_archive)?;
    debug!(
        "Unpacking {} entries from {} into {}",
        archive_zip.len(),
        path_archive.display(),
        dir_dest.display()
    );
    ensure_dir(dir_dest);

    let mut builder_ar_report = ReportArchiveBuilder::default();
    for n_idx in 0..archive_zip.len() {
        builder_ar_report.add_requested();
        let mut entry = match archive_zip.by_index(n_idx) {
            Ok(v) => v,
            Err(e) => {
                builder_ar_report
                    .add_error(PathBuf::from(format!("entry #{n_idx}")), e.to_string());
                continue;
            }
        };

        let name_entry = entry.name().to_string();
        let Some(path_rel) = entry.enclosed_name() else {
            builder_ar_report.add_error(
                PathBuf::from(&name_entry),
                format!("Entry name escapes destination root: {name_entry}"),
            );
            continue;
        };
        let path_dst = dir_dest.join(path_rel);

        if entry.is_dir() {
            ensure_dir(&path_dst);
            builder_ar_report.add_completed();
            continue;
        }

        if let Some(path_parent) = path_dst.parent() {
            ensure_dir(path_parent);
        }
        match _extract_entry(&mut entry, &path_dst) {
            Ok(_) => {
                builder_ar_report.add_completed();
                if spec_unpack_options.if_keep_mtime
                    && let Some(dt_entry) = entry.last_modified()
                    && let Err(msg) = _restore_entry_mtime(dt_entry, &path_dst)
                {
                    builder_ar_report.add_warning(format!(
                        "Failed to restore mtime for {} ({msg})",
                        path_dst.display()
                    ));
                }
            }
            Err(msg) => builder_ar_report.add_error(path_dst, msg),
        }
    }

    Ok(builder_ar_report.build())
}

fn _extract_entry<R>(entry: &mut R, path_dst: &Path) -> Result<(), String>
where
    R: io::Read,
{
    let mut file_dst = File::create(path_dst).map_err(|e| e.to_string())?;
    io::copy(entry, &mut file_dst).map_err(|e| e.to_string())?;
    Ok(())
}

fn _restore_entry_mtime(dt_entry: zip::DateTime, path_dst: &Path) -> Result<(), String> {
    let n_secs = unix_seconds_from_civil(
        i64::from(dt_entry.year()),
        u64::from(dt_entry.month()),
        u64::from(dt_entry.day()),
        u64::from(dt_entry.hour()),
        u64::from(dt_entry.minute()),
        u64::from(dt_entry.second()),
    );
    filetime::set_file_mtime(path_dst, FileTime::from_unix_time(n_secs, 0))
        .map_err(|e| e.to_string())
}
