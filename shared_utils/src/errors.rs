//! Shared error type for both site tools.
//!
//! Every variant maps to a unit of work that gets skipped with a warning;
//! none of them aborts a run on its own.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Folder doesn't exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No images found in {}", .0.display())]
    NoImages(PathBuf),

    #[error("Document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Could not find gallery container in {}", .0.display())]
    RegionNotFound(PathBuf),

    #[error("No placeholder image source in {}", .0.display())]
    PlaceholderNotFound(PathBuf),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Output verification failed for {}: {reason}", path.display())]
    OutputInvalid { path: PathBuf, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
