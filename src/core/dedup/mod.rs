//! # Dedup Module
//!
//! Greedy, order-dependent duplicate filtering over a frame sequence.
//!
//! ## Policy
//! Each frame is preprocessed and compared against every frame already
//! retained, in retention order. The scan stops at the first retained
//! frame whose change score falls strictly below the similarity
//! threshold; the candidate is then discarded. If no retained frame
//! matches (including the trivial empty-set case) the candidate joins
//! the retained set.
//!
//! The policy is first-match-wins and never revisits a decision: the
//! result depends on input order and is not a transitive-closure or
//! globally optimal clustering. For a fixed input order and
//! configuration the result is fully deterministic.

use crate::core::comparator::ChangeDetector;
use crate::core::preprocess::{load_frame, FrameResizer, PreprocessedFrame, Preprocessor};
use crate::core::scanner::FrameFile;
use crate::error::{ConfigError, LoadError};
use crate::events::{DedupEvent, DedupProgress, EventSender};
use std::path::{Path, PathBuf};

/// Configuration for a deduplication run
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Resolution every frame is resized to before comparison.
    /// Aspect-ratio distortion is accepted as-is (no letterboxing).
    pub target_resolution: (u32, u32),
    /// Gaussian blur passes applied in order during preprocessing.
    /// Larger or more radii tolerate more noise at the cost of
    /// missing small real changes.
    pub smoothing_radii: Vec<u32>,
    /// Frames scoring strictly below this are duplicates.
    /// The single dominant tuning knob: higher = more aggressive.
    pub similarity_threshold: f64,
    /// Minimum contiguous changed-region size (pixels) that counts
    /// toward the score.
    pub min_region_area: u32,
    /// Per-pixel binarization threshold used by the change detector.
    pub pixel_threshold: u8,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            target_resolution: (1152, 864),
            smoothing_radii: vec![3, 3],
            similarity_threshold: 10_000.0,
            min_region_area: 500,
            pixel_threshold: crate::core::comparator::DEFAULT_PIXEL_THRESHOLD,
        }
    }
}

impl DedupConfig {
    /// Reject invalid configuration before any frame is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.target_resolution;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidResolution { width, height });
        }

        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold,
            });
        }

        if self.smoothing_radii.iter().any(|&r| r == 0) {
            return Err(ConfigError::InvalidSmoothingRadius);
        }

        Ok(())
    }
}

/// A frame that survived deduplication
#[derive(Debug, Clone)]
pub struct RetainedFrame {
    /// Path of the original file on disk
    pub path: PathBuf,
    /// Its preprocessed representation, kept for comparison against
    /// later candidates
    pub image: PreprocessedFrame,
}

/// Insertion-ordered mapping from frame path to its preprocessed
/// representation, holding exactly the frames judged non-duplicate
/// so far. Grows monotonically during a run; never shrinks.
#[derive(Debug, Clone, Default)]
pub struct RetainedSet {
    frames: Vec<RetainedFrame>,
}

impl RetainedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame has been retained yet
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate retained frames in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &RetainedFrame> {
        self.frames.iter()
    }

    /// Retained paths in insertion order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.frames.iter().map(|f| f.path.clone()).collect()
    }

    /// Look up the preprocessed representation of a retained frame
    pub fn get(&self, path: &Path) -> Option<&PreprocessedFrame> {
        self.frames
            .iter()
            .find(|f| f.path == path)
            .map(|f| &f.image)
    }

    fn insert(&mut self, path: PathBuf, image: PreprocessedFrame) {
        self.frames.push(RetainedFrame { path, image });
    }
}

/// The greedy frame deduplicator
pub struct Deduplicator {
    config: DedupConfig,
    detector: ChangeDetector,
    preprocessor: Preprocessor,
}

impl Deduplicator {
    /// Create a deduplicator, validating the configuration up front.
    pub fn new(config: DedupConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let detector =
            ChangeDetector::new(config.min_region_area).with_pixel_threshold(config.pixel_threshold);
        let preprocessor = Preprocessor::new(config.smoothing_radii.clone());

        Ok(Self {
            config,
            detector,
            preprocessor,
        })
    }

    /// Run deduplication over `frames` in the given order.
    ///
    /// An empty input yields an empty set, not an error. The first frame
    /// that cannot be loaded or decoded aborts the run with its path;
    /// no partial result is returned.
    pub fn deduplicate(&self, frames: &[FrameFile]) -> Result<RetainedSet, LoadError> {
        self.deduplicate_with_events(frames, &crate::events::null_sender())
    }

    /// Run deduplication with progress reporting via events
    pub fn deduplicate_with_events(
        &self,
        frames: &[FrameFile],
        events: &EventSender,
    ) -> Result<RetainedSet, LoadError> {
        events.dedup(DedupEvent::Started {
            total_frames: frames.len(),
        });

        let mut resizer = FrameResizer::new();

        // The retained set is the explicit fold accumulator: each
        // decision reads the set as left by all earlier decisions.
        let retained = frames
            .iter()
            .enumerate()
            .try_fold(RetainedSet::new(), |mut retained, (index, frame)| {
                let candidate = self.preprocess_frame(&frame.path, &mut resizer)?;

                // Scan in insertion order, stopping at the first match.
                // Later retained frames are never scored once one matches.
                let duplicate_of = retained.iter().find_map(|kept| {
                    let change = self.detector.compare(&kept.image, &candidate);
                    (change.score < self.config.similarity_threshold)
                        .then(|| (kept.path.clone(), change.score))
                });

                match duplicate_of {
                    Some((matched, score)) => {
                        tracing::debug!(
                            frame = %frame.path.display(),
                            matched = %matched.display(),
                            score,
                            "discarding duplicate frame",
                        );
                        events.dedup(DedupEvent::FrameDiscarded {
                            path: frame.path.clone(),
                            matched,
                            score,
                        });
                    }
                    None => {
                        events.dedup(DedupEvent::FrameRetained {
                            path: frame.path.clone(),
                        });
                        retained.insert(frame.path.clone(), candidate);
                    }
                }

                events.dedup(DedupEvent::Progress(DedupProgress {
                    completed: index + 1,
                    total: frames.len(),
                    current_path: frame.path.clone(),
                    retained: retained.len(),
                }));

                Ok(retained)
            })?;

        events.dedup(DedupEvent::Completed {
            total_processed: frames.len(),
            retained: retained.len(),
        });

        Ok(retained)
    }

    /// Load, resize and smooth one frame
    fn preprocess_frame(
        &self,
        path: &Path,
        resizer: &mut FrameResizer,
    ) -> Result<PreprocessedFrame, LoadError> {
        let (width, height) = self.config.target_resolution;

        let image = load_frame(path)?;
        let gray = resizer.resize_to_grayscale(path, &image, width, height)?;

        Ok(self.preprocessor.preprocess(gray))
    }
}
