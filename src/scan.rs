//! # Report Discovery
//!
//! Walks report directories and selects files whose name matches the
//! configured glob.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Collect matching report files below `root`, in file name order
///
/// Only the base name is matched, so `Report_*.xml` finds reports at any
/// depth. Entries that cannot be read are logged and skipped.
pub fn find_reports(root: &Path, pattern: &Pattern) -> Vec<PathBuf> {
    let mut reports = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("[{}] {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        debug!("check: {}", entry.path().display());

        let name = entry.file_name().to_string_lossy();
        if !pattern.matches(&name) {
            debug!("skip: {}", entry.path().display());
            continue;
        }

        reports.push(entry.into_path());
    }

    reports
}
