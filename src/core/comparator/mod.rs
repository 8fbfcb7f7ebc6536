//! # Comparator Module
//!
//! Scores how different two preprocessed frames are.
//!
//! ## Algorithm
//! 1. Absolute per-pixel difference of the two grayscale buffers
//! 2. Binarize the difference at `pixel_threshold`
//! 3. Extract 4-connected changed regions from the binary mask
//! 4. Score = total area (pixel count) of regions at least
//!    `min_region_area` pixels large; smaller regions are noise and
//!    do not contribute
//!
//! Higher score = more different. A score of 0 means no change large
//! enough to count. The operation is pure, deterministic and symmetric:
//! |a - b| = |b - a|, so argument order never affects the score.

use crate::core::preprocess::PreprocessedFrame;
use serde::{Deserialize, Serialize};

/// Default binarization threshold for per-pixel differences.
///
/// Differences below this are treated as sensor noise. Exposed as a
/// tunable on [`ChangeDetector`] rather than buried in the algorithm.
pub const DEFAULT_PIXEL_THRESHOLD: u8 = 45;

/// A contiguous changed region between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRegion {
    /// Left edge of the bounding box
    pub x: u32,
    /// Top edge of the bounding box
    pub y: u32,
    /// Bounding box width
    pub width: u32,
    /// Bounding box height
    pub height: u32,
    /// Number of changed pixels in the region (not the bounding box area)
    pub area: u32,
}

/// Result of comparing two preprocessed frames
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeScore {
    /// Total changed area in pixels; larger = more different
    pub score: f64,
    /// The changed regions that contributed to the score,
    /// in discovery (row-major) order
    pub regions: Vec<ChangeRegion>,
}

impl ChangeScore {
    /// A score of zero with no regions: the frames are indistinguishable
    pub fn no_change() -> Self {
        Self {
            score: 0.0,
            regions: Vec::new(),
        }
    }
}

/// Change detector comparing preprocessed frames
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    pixel_threshold: u8,
    min_region_area: u32,
}

impl ChangeDetector {
    /// Create a detector counting only regions of at least `min_region_area` pixels
    pub fn new(min_region_area: u32) -> Self {
        Self {
            pixel_threshold: DEFAULT_PIXEL_THRESHOLD,
            min_region_area,
        }
    }

    /// Override the per-pixel binarization threshold
    pub fn with_pixel_threshold(mut self, threshold: u8) -> Self {
        self.pixel_threshold = threshold;
        self
    }

    /// Compare two frames and return the change score.
    ///
    /// The deduplicator preprocesses every frame to the same resolution
    /// before comparing. Frames of different resolutions cannot be
    /// duplicates of each other, so they score as maximally different
    /// (infinite, with no regions) rather than panicking on a caller bug.
    pub fn compare(&self, a: &PreprocessedFrame, b: &PreprocessedFrame) -> ChangeScore {
        if (a.width(), a.height()) != (b.width(), b.height()) {
            return ChangeScore {
                score: f64::INFINITY,
                regions: Vec::new(),
            };
        }

        // Byte-identical frames are common in dumps; skip the region scan
        if a.as_raw() == b.as_raw() {
            return ChangeScore::no_change();
        }

        let width = a.width() as usize;
        let height = a.height() as usize;

        // Binary change mask
        let mask: Vec<bool> = a
            .as_raw()
            .iter()
            .zip(b.as_raw())
            .map(|(&pa, &pb)| pa.abs_diff(pb) > self.pixel_threshold)
            .collect();

        let regions = self.extract_regions(&mask, width, height);
        let score = regions.iter().map(|r| r.area as f64).sum();

        ChangeScore { score, regions }
    }

    /// Flood-fill the mask into 4-connected regions, keeping those at
    /// least `min_region_area` pixels large.
    fn extract_regions(&self, mask: &[bool], width: usize, height: usize) -> Vec<ChangeRegion> {
        let mut visited = vec![false; mask.len()];
        let mut regions = Vec::new();
        let mut stack = Vec::new();

        for start in 0..mask.len() {
            if !mask[start] || visited[start] {
                continue;
            }

            let mut area = 0u32;
            let (mut min_x, mut min_y) = (width - 1, height - 1);
            let (mut max_x, mut max_y) = (0usize, 0usize);

            visited[start] = true;
            stack.push(start);

            while let Some(idx) = stack.pop() {
                let x = idx % width;
                let y = idx / width;

                area += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                let mut visit = |nx: usize, ny: usize| {
                    let nidx = ny * width + nx;
                    if mask[nidx] && !visited[nidx] {
                        visited[nidx] = true;
                        stack.push(nidx);
                    }
                };

                if x > 0 {
                    visit(x - 1, y);
                }
                if x + 1 < width {
                    visit(x + 1, y);
                }
                if y > 0 {
                    visit(x, y - 1);
                }
                if y + 1 < height {
                    visit(x, y + 1);
                }
            }

            if area >= self.min_region_area {
                regions.push(ChangeRegion {
                    x: min_x as u32,
                    y: min_y as u32,
                    width: (max_x - min_x + 1) as u32,
                    height: (max_y - min_y + 1) as u32,
                    area,
                });
            }
        }

        regions
    }
}
