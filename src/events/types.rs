//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the deduplication pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Deduplication phase events
    Dedup(DedupEvent),
    /// Copy phase events
    Copy(CopyEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { path: PathBuf },
    /// A frame was found
    FrameFound { path: PathBuf },
    /// Scanning completed
    Completed { total_frames: usize },
}

/// Events during the deduplication phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DedupEvent {
    /// Deduplication has started
    Started { total_frames: usize },
    /// Progress update after each frame decision
    Progress(DedupProgress),
    /// A frame was kept as a new scene representative
    FrameRetained { path: PathBuf },
    /// A frame was discarded as a duplicate of an earlier one
    FrameDiscarded {
        path: PathBuf,
        /// The retained frame it matched
        matched: PathBuf,
        /// The score that fell below the threshold
        score: f64,
    },
    /// Deduplication completed
    Completed {
        total_processed: usize,
        retained: usize,
    },
}

/// Progress information during deduplication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupProgress {
    /// Number of frames decided so far
    pub completed: usize,
    /// Total number of frames to process
    pub total: usize,
    /// Frame the decision was made for
    pub current_path: PathBuf,
    /// Size of the retained set so far
    pub retained: usize,
}

/// Events while copying retained frames to the output directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CopyEvent {
    /// Copying has started
    Started { total_frames: usize },
    /// A retained frame was copied
    FrameCopied { src: PathBuf, dst: PathBuf },
    /// Copying completed
    Completed { total_copied: usize },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
    /// Pipeline encountered a fatal error
    Error { message: String },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Deduplicating,
    Copying,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total frames scanned
    pub total_frames: usize,
    /// Number of frames retained
    pub retained: usize,
    /// Number of frames discarded as duplicates
    pub discarded: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Deduplicating => write!(f, "Deduplicating"),
            PipelinePhase::Copying => write!(f, "Copying"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Dedup(DedupEvent::Progress(DedupProgress {
            completed: 10,
            total: 50,
            current_path: PathBuf::from("/frames/c10.png"),
            retained: 3,
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Dedup(DedupEvent::Progress(p)) => {
                assert_eq!(p.retained, 3);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn pipeline_summary_is_serializable() {
        let summary = PipelineSummary {
            total_frames: 1000,
            retained: 42,
            discarded: 958,
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("958"));
    }
}
