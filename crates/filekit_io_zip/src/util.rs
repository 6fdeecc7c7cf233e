use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::spec::ArchiveError;

////////////////////////////////////////////////////////////////////////////////
// #region ArchiveHandles

/// Open an existing archive for reading.
///
/// Maps a missing file to [`ArchiveError::ArchiveNotFound`] and an
/// unreadable/unparsable container to [`ArchiveError::ArchiveOpenFailed`].
pub(crate) fn open_archive_reader(path_archive: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    if !path_archive.is_file() {
        return Err(ArchiveError::ArchiveNotFound(path_archive.to_path_buf()));
    }
    let file_archive = File::open(path_archive).map_err(|e| ArchiveError::ArchiveOpenFailed {
        path: path_archive.to_path_buf(),
        message: e.to_string(),
    })?;
    ZipArchive::new(file_archive).map_err(|e| ArchiveError::ArchiveOpenFailed {
        path: path_archive.to_path_buf(),
        message: e.to_string(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EntryNames

/// Derive a portable entry name from a relative path: components joined with
/// `/` regardless of the platform separator.
pub(crate) fn derive_entry_name(path_rel: &Path) -> String {
    let l_parts: Vec<String> = path_rel
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();
    l_parts.join("/")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EntryTimestamps

/// Unix seconds for a civil date-time, interpreted as UTC.
///
/// Archive entry timestamps carry no zone, so the conversion is inherently
/// approximate; callers use it best-effort only.
pub(crate) fn unix_seconds_from_civil(
    year: i64,
    month: u64,
    day: u64,
    hour: u64,
    minute: u64,
    second: u64,
) -> i64 {
    _days_from_civil(year, month, day) * 86_400 + (hour * 3_600 + minute * 60 + second) as i64
}

fn _days_from_civil(year: i64, month: u64, day: u64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe as i64 - 719_468
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
