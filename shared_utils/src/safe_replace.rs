//! Output verification before anything destructive happens.
//!
//! A converted file only replaces (or lets us delete) its source once it
//! exists, is non-empty and can be opened.

use crate::errors::{Result, SiteError};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Verify output file integrity before deleting original
pub fn verify_output_integrity(output: &Path, min_size: u64) -> std::result::Result<(), String> {
    let metadata =
        fs::metadata(output).map_err(|e| format!("Cannot read output metadata: {}", e))?;

    if metadata.len() == 0 {
        return Err("Output file is empty (0 bytes)".to_string());
    }

    if metadata.len() < min_size {
        return Err(format!(
            "Output file too small: {} < {} bytes",
            metadata.len(),
            min_size
        ));
    }

    let mut file = File::open(output).map_err(|e| format!("Cannot open output file: {}", e))?;
    let mut buffer = [0u8; 16];
    file.read(&mut buffer)
        .map_err(|e| format!("Cannot read output file: {}", e))?;

    Ok(())
}

/// Remove `input` only if `output` passes [`verify_output_integrity`].
pub fn safe_delete_original(input: &Path, output: &Path, min_output_size: u64) -> Result<()> {
    if let Err(reason) = verify_output_integrity(output, min_output_size) {
        tracing::warn!(
            input = %input.display(),
            output = %output.display(),
            reason = %reason,
            "Output integrity check failed, original kept"
        );
        return Err(SiteError::OutputInvalid {
            path: output.to_path_buf(),
            reason,
        });
    }

    fs::remove_file(input).map_err(|e| SiteError::io(input, e))
}

/// True when both paths resolve to the same file on disk
/// (case-insensitive filesystems map `a.JPG` and `a.jpg` together).
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
