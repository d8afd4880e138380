//! Image discovery for gallery pages.

use shared_utils::{collect_files, SiteConfig};
use std::path::{Path, PathBuf};

/// Images in `images/<folder>`, as site-root-relative paths, sorted.
///
/// Each allow-listed suffix is queried on its own, so case variants are
/// distinct patterns. Anything under the backup folder is dropped. A missing
/// folder yields an empty list.
pub fn collect_gallery_images(config: &SiteConfig, folder: &str) -> Vec<PathBuf> {
    let dir = config.image_folder(folder);
    let rel = config.image_folder_rel(folder);

    let mut images: Vec<PathBuf> = config
        .extensions
        .iter()
        .flat_map(|ext| collect_files(&dir, std::slice::from_ref(ext)))
        .filter_map(|path| path.file_name().map(|name| rel.join(name)))
        .filter(|path| !in_backup(path, &config.backup_dir_name))
        .collect();
    images.sort();
    images
}

fn in_backup(path: &Path, backup_dir_name: &str) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_string_lossy() == backup_dir_name)
}

/// Category shown for an image: the name of the folder it sits in.
pub fn infer_category(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
