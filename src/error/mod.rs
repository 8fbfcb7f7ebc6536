//! # Error Module
//!
//! User-friendly error types for the frame deduplicator.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fail loudly** - a frame that cannot be read aborts the run with the
//!   failing path; the retained set is never silently truncated

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum FrameDedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Frame loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that occur during frame discovery
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while loading and decoding a frame
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open frame {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode frame {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Frame is empty or corrupted: {path}")]
    EmptyFrame { path: PathBuf },
}

/// Invalid configuration, rejected before any frame is touched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid target resolution {width}x{height}: both dimensions must be positive")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid similarity threshold {value}: must be finite and non-negative")]
    InvalidThreshold { value: f64 },

    #[error("Invalid smoothing radius 0: radii must be positive")]
    InvalidSmoothingRadius,
}

/// Errors that occur while writing retained frames to the output directory
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {src} to {dst}: {source}")]
    CopyFrame {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FrameDedupError>;
