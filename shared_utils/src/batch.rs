//! Batch Processing Module
//!
//! File collection for a single category folder and the per-batch counters
//! both tools report from.

use crate::common_utils::{has_suffix, is_hidden_file};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files directly inside `dir` whose name ends with one of `suffixes`.
///
/// Not recursive, so backup subfolders never show up. Hidden files
/// (`._photo.jpg` resource forks and the like) are left out. Sorted by path.
pub fn collect_files<S: AsRef<str>>(dir: &Path, suffixes: &[S]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !is_hidden_file(e.path()))
        .filter(|e| has_suffix(e.path(), suffixes))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn fail(&mut self, path: PathBuf, error: String) {
        self.total += 1;
        self.failed += 1;
        self.errors.push((path, error));
    }

    /// Fold another batch into this one.
    pub fn merge(&mut self, other: &BatchResult) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.errors.extend(other.errors.iter().cloned());
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}
