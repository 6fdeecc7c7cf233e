//! Recursive directory tree enumeration.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::spec::{SpecWalkOptions, WalkTreeError};
use crate::util::SpecWalkPatterns;

#[derive(Debug, Clone)]
struct SpecWalkEntry {
    path_entry: PathBuf,
    name_entry: String,
    if_is_dir: bool,
}

#[derive(Debug)]
struct SpecWalkContext {
    spec_walk_options: SpecWalkOptions,
    spec_walk_pats: SpecWalkPatterns,
    set_visited_dirs: HashSet<(u64, u64)>,
    l_paths_out: Vec<PathBuf>,
}

/// Enumerate every file under `dir_root`, depth-first.
///
/// Behavior is controlled by [`SpecWalkOptions`]:
/// - extension acceptance rule applied to file names,
/// - optional include/exclude basename patterns.
///
/// Contract:
/// - Directories themselves are never part of the result; filters decide
///   inclusion of leaf files only.
/// - Each level's listing is sorted lexicographically by entry name before
///   processing, so results are deterministic across platforms.
/// - A subdirectory's results appear as a contiguous block at the point the
///   subdirectory occurs in its parent's sorted listing.
/// - A root that does not exist or is not a directory fails with
///   [`WalkTreeError::SourceNotDirectory`]; unreadable subdirectories below
///   the root are skipped with a warning so one bad subtree does not abort
///   the enumeration.
///
/// Read-only; the traversal has no side effects.
pub fn walk_tree<P>(
    dir_root: P,
    spec_walk_options: SpecWalkOptions,
) -> Result<Vec<PathBuf>, WalkTreeError>
where
    P: AsRef<Path>,
{
    let path_dir_root = dir_root.as_ref().to_path_buf();
    if !path_dir_root.is_dir() {
        return Err(WalkTreeError::SourceNotDirectory(path_dir_root));
    }

    let spec_walk_pats = SpecWalkPatterns::from_raw(
        spec_walk_options.patterns_include_files.as_deref(),
        spec_walk_options.patterns_exclude_files.as_deref(),
        spec_walk_options.rule_pattern,
    )?;

    let mut spec_walk_ctx = SpecWalkContext {
        spec_walk_options,
        spec_walk_pats,
        set_visited_dirs: HashSet::new(),
        l_paths_out: Vec::new(),
    };

    _mark_visited(&path_dir_root, &mut spec_walk_ctx.set_visited_dirs);
    let iter_entries = fs::read_dir(&path_dir_root).map_err(|e| {
        WalkTreeError::SourceNotReadable {
            path: path_dir_root.clone(),
            message: e.to_string(),
        }
    })?;
    walk_level(iter_entries, &mut spec_walk_ctx);
    Ok(spec_walk_ctx.l_paths_out)
}

fn walk_directory(path_dir: &Path, spec_walk_ctx: &mut SpecWalkContext) {
    if !_mark_visited(path_dir, &mut spec_walk_ctx.set_visited_dirs) {
        warn!(
            "Directory cycle detected, not descending: {}",
            path_dir.display()
        );
        return;
    }

    let iter_entries = match fs::read_dir(path_dir) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to read directory {} ({e})", path_dir.display());
            return;
        }
    };
    walk_level(iter_entries, spec_walk_ctx);
}

fn walk_level(iter_entries: fs::ReadDir, spec_walk_ctx: &mut SpecWalkContext) {
    let mut l_entries: Vec<SpecWalkEntry> = Vec::new();

    for _entry_res in iter_entries {
        let entry = match _entry_res {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to read directory entry ({e})");
                continue;
            }
        };

        let path_entry = entry.path();
        let name_entry = entry.file_name().to_string_lossy().to_string();
        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to inspect {} ({e})", path_entry.display());
                continue;
            }
        };

        // Symlinks to directories are followed; the visited set stops link
        // cycles.
        let if_is_dir =
            cfg_file_type.is_dir() || (cfg_file_type.is_symlink() && path_entry.is_dir());
        l_entries.push(SpecWalkEntry {
            path_entry,
            name_entry,
            if_is_dir,
        });
    }

    l_entries.sort_by(|a, b| a.name_entry.cmp(&b.name_entry));

    for _entry in l_entries {
        if _entry.if_is_dir {
            walk_directory(&_entry.path_entry, spec_walk_ctx);
            continue;
        }
        if !spec_walk_ctx
            .spec_walk_options
            .filter_extension
            .is_match(&_entry.name_entry)
        {
            continue;
        }
        if spec_walk_ctx.spec_walk_pats.should_exclude(&_entry.name_entry) {
            continue;
        }
        spec_walk_ctx.l_paths_out.push(_entry.path_entry);
    }
}

/// Record a directory identity; returns `false` when it was seen before.
fn _mark_visited(path_dir: &Path, set_visited_dirs: &mut HashSet<(u64, u64)>) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Ok(stat_dir) = fs::metadata(path_dir) {
            return set_visited_dirs.insert((stat_dir.dev(), stat_dir.ino()));
        }
    }
    let _ = (path_dir, set_visited_dirs);
    true
}
