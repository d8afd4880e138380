//! Page updaters: category pages, the about page and the overview page.
//!
//! Each updater returns `Err` for anything that should skip the page with a
//! warning; the page is then left exactly as it was.

use crate::fragments::{build_fragments, category_alt, GalleryEntry, OVERVIEW_ALT};
use crate::region::{locate_gallery_region, replace_gallery};
use crate::scan::{collect_gallery_images, infer_category};
use regex::{NoExpand, Regex};
use serde::Serialize;
use shared_utils::common_utils::{escape_attr, to_url_path, write_atomic};
use shared_utils::{quiet_println, CategoryPage, Result, SiteConfig, SiteError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct PageUpdate {
    pub page: PathBuf,
    pub images: usize,
    /// False when the new markup matched what was already there
    pub changed: bool,
}

fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SiteError::DocumentNotFound(path.to_path_buf()),
        _ => SiteError::io(path, e),
    })
}

fn write_if_changed(path: &Path, old: &str, new: &str) -> Result<bool> {
    if old == new {
        debug!(page = %path.display(), "Markup already up to date");
        return Ok(false);
    }
    write_atomic(path, new.as_bytes())?;
    Ok(true)
}

/// Replace the gallery region of `page` with one fragment per entry.
pub fn rewrite_gallery(
    config: &SiteConfig,
    page: &Path,
    entries: &[GalleryEntry],
    alt: &str,
) -> Result<PageUpdate> {
    let document = read_page(page)?;
    let region = locate_gallery_region(&document, &config.gallery_class)
        .ok_or_else(|| SiteError::RegionNotFound(page.to_path_buf()))?;

    let fragments = build_fragments(entries, alt, &region.indent);
    let updated = replace_gallery(&document, &region, &fragments);
    let changed = write_if_changed(page, &document, &updated)?;

    info!(page = %page.display(), images = entries.len(), changed, "Gallery rewritten");
    Ok(PageUpdate {
        page: page.to_path_buf(),
        images: entries.len(),
        changed,
    })
}

pub fn update_category_page(config: &SiteConfig, target: &CategoryPage) -> Result<PageUpdate> {
    let images = collect_gallery_images(config, &target.category);
    if images.is_empty() {
        return Err(SiteError::NoImages(config.image_folder_rel(&target.category)));
    }

    quiet_println!("📁 Found {} images in {}/", images.len(), target.category);

    let entries: Vec<GalleryEntry> = images.into_iter().map(GalleryEntry::plain).collect();
    rewrite_gallery(
        config,
        &config.page_path(&target.page),
        &entries,
        &category_alt(&target.category),
    )
}

/// Point the about page's placeholder image at the first about image.
pub fn update_about_page(config: &SiteConfig) -> Result<PageUpdate> {
    let about = &config.about;
    let image = collect_gallery_images(config, &about.category)
        .into_iter()
        .next()
        .ok_or_else(|| SiteError::NoImages(config.image_folder_rel(&about.category)))?;

    let page = config.page_path(&about.page);
    let document = read_page(&page)?;

    let placeholder =
        Regex::new(&config.placeholder_pattern).map_err(|e| SiteError::Pattern(e.to_string()))?;
    if !placeholder.is_match(&document) {
        return Err(SiteError::PlaceholderNotFound(page));
    }

    let src = to_url_path(&image);
    let replacement = format!(r#"src="{}""#, escape_attr(&src));
    let updated = placeholder.replace_all(&document, NoExpand(&replacement));
    let changed = write_if_changed(&page, &document, &updated)?;

    info!(page = %page.display(), image = %src, "About image set");
    quiet_println!("🖼️  About image: {}", src);
    Ok(PageUpdate {
        page,
        images: 1,
        changed,
    })
}

/// Entries for the overview page: the dedicated folder when it has images,
/// otherwise the first few of each fallback category in order.
pub fn overview_entries(config: &SiteConfig) -> Vec<GalleryEntry> {
    let overview = &config.overview;

    if config.image_folder(&overview.folder).is_dir() {
        let images = collect_gallery_images(config, &overview.folder);
        if !images.is_empty() {
            quiet_println!("📁 Found {} images in {}/ folder", images.len(), overview.folder);
            return images
                .into_iter()
                .map(|p| GalleryEntry::tagged(p, &overview.folder))
                .collect();
        }
    }

    let entries: Vec<GalleryEntry> = overview
        .fallback_categories
        .iter()
        .flat_map(|category| {
            collect_gallery_images(config, category)
                .into_iter()
                .take(overview.per_category)
        })
        .map(|path| {
            let category = infer_category(&path);
            GalleryEntry::tagged(path, &category)
        })
        .collect();

    quiet_println!("📁 Using {} images from categories for overview", entries.len());
    entries
}

pub fn update_overview_page(config: &SiteConfig) -> Result<PageUpdate> {
    let entries = overview_entries(config);
    if entries.is_empty() {
        return Err(SiteError::NoImages(config.image_folder_rel(&config.overview.folder)));
    }

    rewrite_gallery(
        config,
        &config.page_path(&config.overview.page),
        &entries,
        OVERVIEW_ALT,
    )
}
