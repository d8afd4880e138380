//! Shared Utilities for the site asset tools
//!
//! Common functionality for `img_normalize` and `gallery_html`:
//! - `SiteConfig`: every folder/page name and encoder setting in one value
//! - `SiteError`: per-unit failures that become skip-plus-warning
//! - Logging (tracing, rotated log file)
//! - File collection and batch counters
//! - Atomic writes and verified replacement of originals
//! - Console output and summary reports

pub mod batch;
pub mod colors;
pub mod common_utils;
pub mod config;
pub mod errors;
pub mod logging;
pub mod progress;
pub mod report;
pub mod safe_replace;

pub use batch::{collect_files, BatchResult};
pub use config::{CategoryPage, OverviewConfig, SiteConfig};
pub use errors::{Result, SiteError};
pub use progress::FolderProgress;
pub use report::{print_page_summary, print_summary_report};
pub use safe_replace::{is_same_file, safe_delete_original, verify_output_integrity};
