//! # Core Module
//!
//! The GUI-agnostic frame deduplication engine.
//!
//! ## Modules
//! - `scanner` - Discovers frames in the source directory
//! - `preprocess` - Loads, resizes and smooths frames for comparison
//! - `comparator` - Scores how different two preprocessed frames are
//! - `dedup` - Greedy first-match-wins duplicate filtering
//! - `pipeline` - Orchestrates scan, dedup and copy phases

pub mod comparator;
pub mod dedup;
pub mod pipeline;
pub mod preprocess;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{ChangeDetector, ChangeRegion, ChangeScore};
pub use dedup::{DedupConfig, Deduplicator, RetainedSet};
pub use preprocess::{PreprocessedFrame, Preprocessor};
pub use scanner::FrameFile;
