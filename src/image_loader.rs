//! Image loading and discovery
//!
//! Single entry point for decoding collage inputs plus the recursive
//! directory scan that feeds the pipeline. Decoding uses the `image` crate;
//! the scan filters case-insensitively on the supported extensions and
//! returns paths in sorted order so discovery order is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};

use crate::error::{CollageError, Result};

/// Extensions accepted by the directory scan (lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Load and decode an image from disk
///
/// # Arguments
///
/// * `path` - Path to the image file
///
/// # Errors
///
/// Returns `CollageError::ImageLoadError` if the file cannot be opened or
/// the pixel data cannot be decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        CollageError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    reader.decode().map_err(|e| {
        CollageError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })
}

/// Read an image's native dimensions without decoding the pixel data
///
/// # Errors
///
/// Returns `CollageError::SizingError` when the header cannot be parsed.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| CollageError::SizingError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Recursively collect every supported image file under `root`.
///
/// A single-file `root` is returned as-is when its extension is supported.
/// Results are sorted so two runs over the same tree discover files in the
/// same order.
///
/// # Errors
///
/// Returns `CollageError::ScanError` if a directory cannot be read.
pub fn find_image_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if root.is_file() {
        if has_supported_extension(root) {
            files.push(root.to_path_buf());
        }
        return Ok(files);
    }

    collect_from_dir(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_from_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| CollageError::ScanError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| CollageError::ScanError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_from_dir(&path, files)?;
        } else if has_supported_extension(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(is_supported_extension)
        .unwrap_or(false)
}
