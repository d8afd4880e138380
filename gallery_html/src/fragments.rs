//! Markup for one gallery entry per image.

use shared_utils::common_utils::{capitalize, escape_attr, to_url_path};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Site-root-relative image path
    pub path: PathBuf,
    /// Written as `data-category` when set
    pub category: Option<String>,
}

impl GalleryEntry {
    pub fn plain(path: PathBuf) -> Self {
        Self { path, category: None }
    }

    pub fn tagged(path: PathBuf, category: &str) -> Self {
        Self {
            path,
            category: Some(category.to_string()),
        }
    }
}

/// Alt text for a category page: `"Portraits Photography"`.
pub fn category_alt(category: &str) -> String {
    format!("{} Photography", capitalize(category))
}

pub const OVERVIEW_ALT: &str = "Photography";

/// One `gallery-item` block per entry, indented one level below `indent`.
pub fn build_fragments(entries: &[GalleryEntry], alt: &str, indent: &str) -> String {
    let alt = escape_attr(alt);
    entries
        .iter()
        .map(|entry| {
            let category_attr = entry
                .category
                .as_deref()
                .map(|c| format!(r#" data-category="{}""#, escape_attr(c)))
                .unwrap_or_default();
            format!(
                "{indent}  <div class=\"gallery-item\"{category_attr}>\n\
                 {indent}    <img src=\"{src}\" alt=\"{alt}\">\n\
                 {indent}  </div>",
                indent = indent,
                category_attr = category_attr,
                src = escape_attr(&to_url_path(&entry.path)),
                alt = alt,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
