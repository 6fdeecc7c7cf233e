//! Removal report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::SpecRemoveError;

/// Aggregate counters and diagnostics for one `remove_files` run.
#[derive(Debug, Default, Clone)]
pub struct ReportRemove {
    /// Total paths requested for removal.
    pub cnt_requested: u64,
    /// Number of files actually removed.
    pub cnt_removed: u64,
    /// Number of paths that did not exist.
    pub cnt_missing: u64,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Per-entry failures.
    pub errors: Vec<SpecRemoveError>,
}

impl ReportRemove {
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
        dict_counts.insert("cnt_removed".to_string(), self.cnt_removed);
        dict_counts.insert("cnt_missing".to_string(), self.cnt_missing);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} requested={} removed={} missing={} errors={} warnings={}",
            dict_counts["cnt_requested"],
            dict_counts["cnt_removed"],
            dict_counts["cnt_missing"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportRemove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[REMOVE]"))
    }
}

/// Mutable accumulator for removal statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportRemoveBuilder {
    /// See [`ReportRemove::cnt_requested`].
    pub cnt_requested: u64,
    /// See [`ReportRemove::cnt_removed`].
    pub cnt_removed: u64,
    /// See [`ReportRemove::cnt_missing`].
    pub cnt_missing: u64,
    /// See [`ReportRemove::warnings`].
    pub warnings: Vec<String>,
    /// See [`ReportRemove::errors`].
    pub errors: Vec<SpecRemoveError>,
}

impl ReportRemoveBuilder {
    /// Increment requested count by one.
    pub fn add_requested(&mut self) {
        self.cnt_requested += 1;
    }

    /// Increment removed count by one.
    pub fn add_removed(&mut self) {
        self.cnt_removed += 1;
    }

    /// Increment missing count by one.
    pub fn add_missing(&mut self) {
        self.cnt_missing += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: std::path::PathBuf, exception: String) {
        self.errors.push(SpecRemoveError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportRemove {
        ReportRemove {
            cnt_requested: self.cnt_requested,
            cnt_removed: self.cnt_removed,
            cnt_missing: self.cnt_missing,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}
