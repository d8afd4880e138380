//! Folder-level orchestration: backup, normalize, tally.

use crate::normalizer::normalize_image;
use serde::Serialize;
use shared_utils::colors::{fmt_file_result, print_info, print_warning};
use shared_utils::common_utils::{copy_preserving_times, ensure_dir_exists, percent_reduction, to_kb};
use shared_utils::{
    collect_files, quiet_println, BatchResult, FolderProgress, Result, SiteConfig, SiteError,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct FolderReport {
    pub folder: PathBuf,
    /// The folder itself was missing
    pub missing: bool,
    pub result: BatchResult,
    pub original_bytes: u64,
    pub new_bytes: u64,
    pub backup_dir: Option<PathBuf>,
}

impl FolderReport {
    fn empty(folder: &Path, missing: bool) -> Self {
        Self {
            folder: folder.to_path_buf(),
            missing,
            result: BatchResult::new(),
            original_bytes: 0,
            new_bytes: 0,
            backup_dir: None,
        }
    }

    pub fn reduction(&self) -> f64 {
        percent_reduction(self.original_bytes, self.new_bytes)
    }
}

/// Copy `file` into `backup_dir` unless a backup with that name already exists.
///
/// Returns `true` when a new backup was written. An existing backup is never touched.
pub fn backup_original(file: &Path, backup_dir: &Path) -> Result<bool> {
    ensure_dir_exists(backup_dir)?;

    let Some(name) = file.file_name() else {
        return Ok(false);
    };
    let backup_path = backup_dir.join(name);
    if backup_path.exists() {
        debug!(backup = %backup_path.display(), "Backup already present");
        return Ok(false);
    }

    copy_preserving_times(file, &backup_path)?;
    debug!(file = %file.display(), backup = %backup_path.display(), "Backed up original");
    Ok(true)
}

/// Normalize every supported image directly inside `folder`.
///
/// Per-file failures are counted and reported; they never stop the folder.
/// A file whose backup could not be written is not touched.
pub fn process_folder(folder: &Path, config: &SiteConfig) -> FolderReport {
    let display_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| folder.display().to_string());

    if !folder.is_dir() {
        print_warning(&SiteError::DirectoryNotFound(folder.to_path_buf()).to_string());
        warn!(folder = %folder.display(), "Image folder missing");
        return FolderReport::empty(folder, true);
    }

    let images = collect_files(folder, &config.extensions);
    if images.is_empty() {
        quiet_println!("📁 No images found in: {}", folder.display());
        info!(folder = %folder.display(), "No images in folder");
        return FolderReport::empty(folder, false);
    }

    quiet_println!("\n📁 Processing {} image(s) in {}/...", images.len(), display_name);

    let backup_dir = config.backup_dir_for(folder);
    let mut report = FolderReport::empty(folder, false);
    let progress = FolderProgress::new(images.len() as u64, &display_name);

    for path in &images {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        progress.set_current_file(&name);

        let outcome = backup_original(path, &backup_dir).and_then(|_| normalize_image(path, config));
        match outcome {
            Ok(done) => {
                report.result.success();
                report.original_bytes += done.original_size;
                report.new_bytes += done.new_size;
                progress.println(&fmt_file_result(
                    &name,
                    to_kb(done.original_size),
                    to_kb(done.new_size),
                    done.reduction,
                ));
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to process image");
                progress.println(&format!("  ✗ Failed to process {}: {}", name, e));
                report.result.fail(path.clone(), e.to_string());
            }
        }
        progress.inc();
    }
    progress.finish();

    if report.result.succeeded > 0 {
        quiet_println!(
            "\n  📊 Total: {:.1}KB → {:.1}KB ({:.1}% reduction)",
            to_kb(report.original_bytes),
            to_kb(report.new_bytes),
            report.reduction()
        );
        print_info(&format!("  💾 Originals backed up in: {}/", backup_dir.display()));
        report.backup_dir = Some(backup_dir);
    }

    info!(
        folder = %folder.display(),
        succeeded = report.result.succeeded,
        failed = report.result.failed,
        original_bytes = report.original_bytes,
        new_bytes = report.new_bytes,
        "Folder done"
    );

    report
}
