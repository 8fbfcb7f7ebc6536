//! # Preprocess Module
//!
//! Turns an on-disk frame into a comparison-ready representation:
//! decode, resize to the common resolution, convert to grayscale,
//! then apply successive Gaussian blur passes.
//!
//! Resizing removes resolution mismatch as a confound (aspect-ratio
//! distortion is accepted as-is, no letterboxing). Blurring suppresses
//! sensor noise so near-identical frames are not flagged as different.
//!
//! Every step is a pure function of its input: preprocessing the same
//! frame twice with the same configuration yields bit-identical output.

mod resize;

pub use resize::FrameResizer;

use crate::error::LoadError;
use image::{imageops, DynamicImage, GrayImage};
use std::path::Path;

/// The normalized, comparison-ready representation of one frame.
///
/// Fixed resolution, single channel, smoothed. Immutable once produced;
/// ownership transfers to the retained set when the frame is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessedFrame {
    pixels: GrayImage,
}

impl PreprocessedFrame {
    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw grayscale pixel data, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Wrap an already-normalized grayscale buffer.
    ///
    /// Callers are responsible for the buffer actually being at the
    /// common resolution; mixing resolutions makes comparison meaningless.
    pub fn from_gray(pixels: GrayImage) -> Self {
        Self { pixels }
    }
}

/// Decode a frame from disk.
///
/// Fails with the offending path: the deduplicator aborts on the first
/// unreadable frame rather than silently skipping it.
pub fn load_frame(path: &Path) -> Result<DynamicImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory(&bytes).map_err(|e| LoadError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::EmptyFrame {
            path: path.to_path_buf(),
        });
    }

    Ok(image)
}

/// Applies the configured smoothing passes to a normalized grayscale frame.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    smoothing_radii: Vec<u32>,
}

impl Preprocessor {
    /// Create a preprocessor applying the given blur radii in order.
    ///
    /// An empty list is valid and means no smoothing.
    pub fn new(smoothing_radii: Vec<u32>) -> Self {
        Self { smoothing_radii }
    }

    /// Smooth a grayscale frame into its comparison-ready form.
    pub fn preprocess(&self, gray: GrayImage) -> PreprocessedFrame {
        let mut pixels = gray;
        for &radius in &self.smoothing_radii {
            // Matches the usual kernel-size to sigma rule of thumb for a
            // Gaussian blur with kernel width `radius`
            let sigma = 0.3 * ((radius as f32 - 1.0) * 0.5 - 1.0) + 0.8;
            pixels = imageops::blur(&pixels, sigma.max(0.1));
        }
        PreprocessedFrame { pixels }
    }
}
