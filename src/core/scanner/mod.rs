//! # Scanner Module
//!
//! Discovers frame files in the source directory.
//!
//! Frames are yielded in directory-listing order, which is
//! platform-dependent and deliberately not sorted: the deduplicator's
//! greedy policy is defined over whatever order the filesystem reports,
//! matching how sequential frame dumps are normally consumed.
//!
//! ## Supported Formats
//! - PNG (.png)
//! - JPEG (.jpg, .jpeg)
//! - WebP (.webp)
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff, .tif)

mod filter;
mod walker;

pub use filter::FrameFilter;
pub use walker::{DirectoryScanner, ScanConfig};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents a discovered frame file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameFile {
    /// Path to the frame file
    pub path: PathBuf,
    /// Detected image format
    pub format: ImageFormat,
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
    Bmp,
    Tiff,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "webp" => ImageFormat::WebP,
            "gif" => ImageFormat::Gif,
            "bmp" => ImageFormat::Bmp,
            "tiff" | "tif" => ImageFormat::Tiff,
            _ => ImageFormat::Unknown,
        }
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_from_extension_lowercase() {
        assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("tif"), ImageFormat::Tiff);
    }

    #[test]
    fn image_format_from_extension_uppercase() {
        assert_eq!(ImageFormat::from_extension("PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let format = ImageFormat::from_extension("mp4");
        assert_eq!(format, ImageFormat::Unknown);
        assert!(!format.is_supported());
    }
}
