//! # Pipeline Module
//!
//! Orchestrates the full deduplication workflow.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Discover frames in the source directory
//! 2. **Dedup** - Greedy duplicate filtering in listing order
//! 3. **Copy** - Copy retained frames to the output directory
//!
//! Processing is strictly sequential: each dedup decision depends on the
//! retained set as mutated by all earlier decisions, so there is no
//! parallel phase.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineResult};
