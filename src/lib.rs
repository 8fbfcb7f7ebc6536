//! # Frame Dedup
//!
//! Removes near-duplicate frames from a folder of sequentially captured
//! images (e.g., video frame dumps), keeping one representative per
//! visually distinct scene.
//!
//! ## Core Philosophy
//! - **Greedy, order-dependent** - each frame is compared against the frames
//!   already kept, in the order they were kept; the first frame of a scene
//!   wins, never the "best" one
//! - **Never skip silently** - an unreadable frame aborts the run with the
//!   failing path instead of quietly shrinking the result
//! - **Deterministic** - same input order and configuration, same output
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - scanning, preprocessing, change detection, deduplication
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - user-friendly error types
//! - `cli` - command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{FrameDedupError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
