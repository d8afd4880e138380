//! Image normalizer for the site's category folders.
//!
//! Each supported image is backed up to `original_backup/`, flattened to RGB,
//! downsized to the configured width and re-encoded as JPEG.

pub mod folder;
pub mod normalizer;

pub use folder::{backup_original, process_folder, FolderReport};
pub use normalizer::{derive_output_path, normalize_image, target_dimensions, NormalizeOutcome};

use serde::Serialize;
use shared_utils::colors::{print_header, print_rule, print_warning};
use shared_utils::{print_summary_report, quiet_println, BatchResult, SiteConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    /// `images/` was missing and nothing was attempted
    pub halted: bool,
    pub folders: Vec<FolderReport>,
    pub totals: BatchResult,
    pub original_bytes: u64,
    pub new_bytes: u64,
    pub elapsed_secs: f64,
}

/// Normalize every configured folder in order.
///
/// Only a missing `images/` directory stops the run; everything else is
/// reported per folder or per file.
pub fn run(config: &SiteConfig) -> RunSummary {
    let start = Instant::now();
    let mut summary = RunSummary {
        root: config.root.clone(),
        halted: false,
        folders: Vec::new(),
        totals: BatchResult::new(),
        original_bytes: 0,
        new_bytes: 0,
        elapsed_secs: 0.0,
    };

    print_header("🖼️  Image Resizer & Optimizer");

    let images_root = config.images_root();
    if !images_root.is_dir() {
        print_warning(&format!(
            "'{}' folder doesn't exist yet.\n   Please add your photos to the {}/ folders first.",
            config.images_dir, config.images_dir
        ));
        warn!(path = %images_root.display(), "Images directory missing, nothing to do");
        summary.halted = true;
        return summary;
    }

    quiet_println!("\n📂 Working directory: {}", config.root.display());
    quiet_println!("🎯 Target width: {}px", config.max_width);
    quiet_println!("💎 Quality: {}%", config.jpeg_quality);
    info!(
        root = %config.root.display(),
        max_width = config.max_width,
        quality = config.jpeg_quality,
        "Starting normalization"
    );

    for name in &config.normalize_folders {
        let report = process_folder(&config.image_folder(name), config);
        summary.totals.merge(&report.result);
        summary.original_bytes += report.original_bytes;
        summary.new_bytes += report.new_bytes;
        summary.folders.push(report);
    }

    let elapsed = start.elapsed();
    summary.elapsed_secs = elapsed.as_secs_f64();
    info!(
        succeeded = summary.totals.succeeded,
        failed = summary.totals.failed,
        success_rate = summary.totals.success_rate(),
        "Normalization finished"
    );

    print_summary_report(
        &summary.totals,
        elapsed,
        summary.original_bytes,
        summary.new_bytes,
        "Image Normalize",
    );

    quiet_println!();
    print_rule();
    quiet_println!("✅ Done! All images have been resized and optimized.");
    print_rule();
    quiet_println!(
        "\n💡 Tip: Original images are backed up in '{}' folders",
        config.backup_dir_name
    );
    quiet_println!("   You can delete them later if you're happy with the resized versions.\n");

    summary
}
