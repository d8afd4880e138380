//! Gallery markup updater.
//!
//! Rewrites the gallery container of each category page, the about page's
//! placeholder image and the overview page from the images on disk. A page
//! that can't be updated is skipped with a warning and left untouched.

pub mod fragments;
pub mod pages;
pub mod region;
pub mod scan;

pub use fragments::{build_fragments, category_alt, GalleryEntry, OVERVIEW_ALT};
pub use pages::{
    overview_entries, update_about_page, update_category_page, update_overview_page, PageUpdate,
};
pub use region::{locate_gallery_region, replace_gallery, GalleryRegion};
pub use scan::{collect_gallery_images, infer_category};

use serde::Serialize;
use shared_utils::colors::{print_header, print_rule, print_success, print_warning};
use shared_utils::{print_page_summary, quiet_println, Result, SiteConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    pub page: String,
    pub updated: bool,
    pub images: usize,
    /// Warning text when the page was skipped
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    /// `images/` was missing and no page was touched
    pub halted: bool,
    pub pages: Vec<PageOutcome>,
    pub updated: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            halted: false,
            pages: Vec::new(),
            updated: 0,
            skipped: 0,
            warnings: Vec::new(),
            elapsed_secs: 0.0,
        }
    }

    fn record(&mut self, page: &str, result: Result<PageUpdate>) {
        match result {
            Ok(update) => {
                print_success(&format!("Updated {} ({} image(s))", page, update.images));
                self.updated += 1;
                self.pages.push(PageOutcome {
                    page: page.to_string(),
                    updated: true,
                    images: update.images,
                    message: None,
                });
            }
            Err(e) => {
                let message = e.to_string();
                print_warning(&message);
                warn!(page, error = %message, "Page skipped");
                self.skipped += 1;
                self.warnings.push(message.clone());
                self.pages.push(PageOutcome {
                    page: page.to_string(),
                    updated: false,
                    images: 0,
                    message: Some(message),
                });
            }
        }
    }
}

/// Update every configured page: categories first, then about, then overview.
///
/// Only a missing `images/` directory stops the run.
pub fn run(config: &SiteConfig) -> RunSummary {
    let start = Instant::now();
    let mut summary = RunSummary::new(config.root.clone());

    print_header("🔄 Updating HTML files with your images");

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

    info!(root = %config.root.display(), "Updating gallery pages");

    for target in &config.category_pages {
        quiet_println!("\n📝 Processing {}...", target.page);
        summary.record(&target.page, update_category_page(config, target));
    }

    quiet_println!("\n📝 Processing {}...", config.about.page);
    summary.record(&config.about.page, update_about_page(config));

    quiet_println!("\n📝 Processing {}...", config.overview.page);
    summary.record(&config.overview.page, update_overview_page(config));

    summary.elapsed_secs = start.elapsed().as_secs_f64();
    info!(
        updated = summary.updated,
        skipped = summary.skipped,
        "Gallery pages done"
    );

    print_page_summary(summary.updated, summary.skipped, &summary.warnings);
    quiet_println!();
    print_rule();
    quiet_println!("✅ Done! Your HTML files have been updated.");
    print_rule();
    quiet_println!("\n💡 Open the pages in your browser to check the galleries.\n");

    summary
}
