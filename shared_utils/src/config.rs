//! Site Configuration Module
//!
//! Every folder name, page name and encoder setting the two tools rely on
//! lives in one `SiteConfig` value. Build it once in `main`, hand it down by
//! reference.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum output width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

/// JPEG quality (85 is a good balance between size and artefacts).
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Case-sensitive suffix allow-list. Case variants are listed explicitly.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".JPG", ".JPEG", ".PNG"];

pub const BACKUP_DIR_NAME: &str = "original_backup";

pub const GALLERY_CLASS: &str = "gallery-container";

/// Images per category when the overview page falls back to a mix.
pub const OVERVIEW_PER_CATEGORY: usize = 8;

/// A category folder paired with the page that displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: String,
    pub page: String,
}

impl CategoryPage {
    pub fn new(category: &str, page: &str) -> Self {
        Self {
            category: category.to_string(),
            page: page.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Dedicated folder, preferred when present and non-empty
    pub folder: String,
    pub page: String,
    /// Categories mixed in (in this order) when the dedicated folder is empty
    pub fallback_categories: Vec<String>,
    pub per_category: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root; `images/` and the HTML pages live directly below it
    pub root: PathBuf,
    pub images_dir: String,
    pub backup_dir_name: String,
    pub max_width: u32,
    pub jpeg_quality: u8,
    pub extensions: Vec<String>,
    /// Folders (below `images_dir`) the normalizer walks, in order
    pub normalize_folders: Vec<String>,
    pub category_pages: Vec<CategoryPage>,
    pub about: CategoryPage,
    pub overview: OverviewConfig,
    pub gallery_class: String,
    /// Regex matching the stub image source in the about page
    pub placeholder_pattern: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let categories = ["portraits", "dance", "engagement", "fashion"];
        Self {
            root: PathBuf::from("."),
            images_dir: "images".to_string(),
            backup_dir_name: BACKUP_DIR_NAME.to_string(),
            max_width: DEFAULT_MAX_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            normalize_folders: categories
                .iter()
                .chain(std::iter::once(&"about"))
                .map(|c| c.to_string())
                .collect(),
            category_pages: categories
                .iter()
                .map(|c| CategoryPage::new(c, &format!("{}.html", c)))
                .collect(),
            about: CategoryPage::new("about", "about.html"),
            overview: OverviewConfig {
                folder: "overview".to_string(),
                page: "index.html".to_string(),
                fallback_categories: categories.iter().map(|c| c.to_string()).collect(),
                per_category: OVERVIEW_PER_CATEGORY,
            },
            gallery_class: GALLERY_CLASS.to_string(),
            placeholder_pattern: r#"src="https://via\.placeholder\.com/[^"]*""#.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// `<root>/images`
    pub fn images_root(&self) -> PathBuf {
        self.root.join(&self.images_dir)
    }

    /// `images/<name>`, relative to the site root. This is the form written into pages.
    pub fn image_folder_rel(&self, name: &str) -> PathBuf {
        Path::new(&self.images_dir).join(name)
    }

    pub fn image_folder(&self, name: &str) -> PathBuf {
        self.root.join(self.image_folder_rel(name))
    }

    pub fn page_path(&self, page: &str) -> PathBuf {
        self.root.join(page)
    }

    pub fn backup_dir_for(&self, folder: &Path) -> PathBuf {
        folder.join(&self.backup_dir_name)
    }
}
