//! Path utilities for selecting source images by extension.

use std::path::Path;

/// Extensions the darkener accepts as source images.
const SOURCE_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a path has a source image extension (`png`, `jpg`, `jpeg`).
///
/// The comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use facetprep_common::paths::is_source_image;
///
/// assert!(is_source_image(Path::new("img.png")));
/// assert!(is_source_image(Path::new("/data/val2017/000000000139.JPEG")));
/// assert!(!is_source_image(Path::new("notes.txt")));
/// ```
pub fn is_source_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a path should be written with the JPEG encoder.
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}
