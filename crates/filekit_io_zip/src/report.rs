//! Archive batch report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::SpecArchiveError;

/// Aggregate counters and diagnostics for one pack/unpack run.
///
/// The same shape serves both directions: `cnt_completed` counts entries
/// added for the pack operations and entries materialized for extraction.
#[derive(Debug, Default, Clone)]
pub struct ReportArchive {
    /// Total entries the batch attempted.
    pub cnt_requested: u64,
    /// Number of entries added/extracted successfully.
    pub cnt_completed: u64,
    /// Number of entries skipped (e.g. directory sources).
    pub cnt_skipped: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Per-entry failures.
    pub errors: Vec<SpecArchiveError>,
}

impl ReportArchive {
    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_requested".to_string(), self.cnt_requested);
        dict_counts.insert("cnt_completed".to_string(), self.cnt_completed);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} requested={} completed={} skipped={} errors={} warnings={}",
            dict_counts["cnt_requested"],
            dict_counts["cnt_completed"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[ARCHIVE]"))
    }
}

/// Mutable accumulator for archive batch statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportArchiveBuilder {
    /// See [`ReportArchive::cnt_requested`].
    pub cnt_requested: u64,
    /// See [`ReportArchive::cnt_completed`].
    pub cnt_completed: u64,
    /// See [`ReportArchive::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportArchive::warnings`].
    pub warnings: Vec<String>,
    /// See [`ReportArchive::errors`].
    pub errors: Vec<SpecArchiveError>,
}

impl ReportArchiveBuilder {
    /// Increment requested count by one.
    pub fn add_requested(&mut self) {
        self.cnt_requested += 1;
    }

    /// Increment completed count by one.
    pub fn add_completed(&mut self) {
        self.cnt_completed += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: std::path::PathBuf, exception: String) {
        self.errors.push(SpecArchiveError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportArchive {
        ReportArchive {
            cnt_requested: self.cnt_requested,
            cnt_completed: self.cnt_completed,
            cnt_skipped: self.cnt_skipped,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}
