//! Common Utilities Module
//!
//! 通用工具函数集合: file helpers shared by the normalizer and the markup
//! updater. All filesystem errors carry the path they happened on.

use crate::errors::{Result, SiteError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// ═══════════════════════════════════════════════════════════════
// 文件操作工具 (File Operations)
// ═══════════════════════════════════════════════════════════════

/// Check whether the file name ends with one of the given suffixes.
///
/// Unlike the lowercase extension checks elsewhere, this is case-sensitive:
/// `.JPG` only matches if `.JPG` is in the list.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::has_suffix;
///
/// assert!(has_suffix(Path::new("a.JPG"), &[".jpg", ".JPG"]));
/// assert!(!has_suffix(Path::new("a.Jpg"), &[".jpg", ".JPG"]));
/// ```
pub fn has_suffix<S: AsRef<str>>(path: &Path, suffixes: &[S]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| suffixes.iter().any(|s| n.ends_with(s.as_ref())))
        .unwrap_or(false)
}

/// 检查文件是否为隐藏文件（以点号开头）
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::is_hidden_file;
///
/// assert!(is_hidden_file(Path::new("._a.jpg")));
/// assert!(!is_hidden_file(Path::new("a.jpg")));
/// ```
pub fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Create a directory (and parents). Existing directories are fine.
pub fn ensure_dir_exists(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| SiteError::io(dir, e))
}

/// Copy a file and carry its access/modification times over to the copy.
///
/// Returns the number of bytes copied.
pub fn copy_preserving_times(source: &Path, dest: &Path) -> Result<u64> {
    let bytes = fs::copy(source, dest).map_err(|e| SiteError::io(dest, e))?;

    let metadata = fs::metadata(source).map_err(|e| SiteError::io(source, e))?;
    let atime = filetime::FileTime::from_last_access_time(&metadata);
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_times(dest, atime, mtime) {
        // the bytes are safe, only the timestamps are lost
        tracing::warn!(path = %dest.display(), error = %e, "Failed to copy timestamps");
    }

    Ok(bytes)
}

/// Write `contents` to `path` through a temp file in the same directory,
/// then rename it into place. Readers never see a half-written file.
///
/// An existing `path` keeps its permissions.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    write_atomic_like(path, contents, path)
}

/// [`write_atomic`], taking permissions from `path` when it exists and from
/// `template` otherwise (`a.png` -> `a.jpg` keeps the png's mode).
pub fn write_atomic_like(path: &Path, contents: &[u8], template: &Path) -> Result<()> {
    let dir = parent_dir(path);
    let mut tmp = tempfile::Builder::new()
        .prefix(".site-tools-")
        .tempfile_in(&dir)
        .map_err(|e| SiteError::io(&dir, e))?;
    tmp.write_all(contents).map_err(|e| SiteError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| SiteError::io(tmp.path(), e))?;

    // temp files are created 0600
    if let Ok(meta) = fs::metadata(path).or_else(|_| fs::metadata(template)) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| SiteError::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| SiteError::io(path, e.error))?;
    Ok(())
}

/// Parent directory of `path`, `.` for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| SiteError::io(path, e))
}

// ═══════════════════════════════════════════════════════════════
// 字符串处理工具 (String Processing)
// ═══════════════════════════════════════════════════════════════

/// Path rendered with forward slashes, the way it goes into markup.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::to_url_path;
///
/// assert_eq!(to_url_path(Path::new("images/dance/a.jpg")), "images/dance/a.jpg");
/// ```
pub fn to_url_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// First character uppercased, the rest lowercased (`"dance"` -> `"Dance"`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percentage saved going from `before` to `after` bytes. Negative when the file grew.
pub fn percent_reduction(before: u64, after: u64) -> f64 {
    if before == 0 {
        0.0
    } else {
        (before as f64 - after as f64) / before as f64 * 100.0
    }
}

pub fn to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
