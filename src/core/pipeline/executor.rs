//! Pipeline execution implementation.

use crate::core::dedup::{DedupConfig, Deduplicator};
use crate::core::scanner::{DirectoryScanner, ScanConfig};
use crate::error::{FrameDedupError, OutputError};
use crate::events::{
    null_sender, CopyEvent, EventSender, PipelineEvent, PipelinePhase, PipelineSummary,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of pipeline execution
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    /// Retained frame paths, in retention order
    pub retained: Vec<PathBuf>,
    /// Total frames scanned
    pub total_frames: usize,
    /// Number of frames discarded as duplicates
    pub discarded: usize,
    /// Where retained frames were copied, if an output directory was set
    pub output_dir: Option<PathBuf>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    source: PathBuf,
    output_dir: Option<PathBuf>,
    dedup_config: DedupConfig,
    scan_config: ScanConfig,
}

impl PipelineBuilder {
    /// Create a builder for deduplicating `source`
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: None,
            dedup_config: DedupConfig::default(),
            scan_config: ScanConfig::default(),
        }
    }

    /// Copy retained frames to this directory (created if absent)
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the deduplication configuration
    pub fn dedup_config(mut self, config: DedupConfig) -> Self {
        self.dedup_config = config;
        self
    }

    /// Set the scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.scan_config.include_hidden = include;
        self
    }

    /// Build the pipeline, validating the dedup configuration
    pub fn build(self) -> Result<Pipeline, FrameDedupError> {
        let deduplicator = Deduplicator::new(self.dedup_config)?;
        Ok(Pipeline {
            source: self.source,
            output_dir: self.output_dir,
            scan_config: self.scan_config,
            deduplicator,
        })
    }
}

/// The frame deduplication pipeline
pub struct Pipeline {
    source: PathBuf,
    output_dir: Option<PathBuf>,
    scan_config: ScanConfig,
    deduplicator: Deduplicator,
}

impl Pipeline {
    /// Create a new pipeline builder for the given source directory
    pub fn builder(source: impl Into<PathBuf>) -> PipelineBuilder {
        PipelineBuilder::new(source)
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, FrameDedupError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(
        &self,
        events: &EventSender,
    ) -> Result<PipelineResult, FrameDedupError> {
        let start_time = Instant::now();

        events.pipeline(PipelineEvent::Started);

        // Phase 1: Scanning
        events.phase(PipelinePhase::Scanning);

        let scanner = DirectoryScanner::new(self.scan_config.clone());
        let frames = scanner
            .scan_with_events(&self.source, events)
            .map_err(|e| self.fail(events, e))?;

        let total_frames = frames.len();
        tracing::info!(total_frames, source = %self.source.display(), "scan complete");

        // Phase 2: Deduplicating
        events.phase(PipelinePhase::Deduplicating);

        let retained_set = self
            .deduplicator
            .deduplicate_with_events(&frames, events)
            .map_err(|e| self.fail(events, e))?;

        let retained = retained_set.paths();
        let discarded = total_frames - retained.len();

        // Phase 3: Copying
        if let Some(ref output_dir) = self.output_dir {
            events.phase(PipelinePhase::Copying);

            self.copy_retained(&retained, output_dir, events)
                .map_err(|e| self.fail(events, e))?;
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;

        events.pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_frames,
                retained: retained.len(),
                discarded,
                duration_ms,
            },
        });

        Ok(PipelineResult {
            retained,
            total_frames,
            discarded,
            output_dir: self.output_dir.clone(),
            duration_ms,
        })
    }

    fn copy_retained(
        &self,
        retained: &[PathBuf],
        output_dir: &Path,
        events: &EventSender,
    ) -> Result<(), OutputError> {
        fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;

        events.copy(CopyEvent::Started {
            total_frames: retained.len(),
        });

        for src in retained {
            let file_name = src.file_name().unwrap_or(src.as_os_str());
            let dst = output_dir.join(file_name);

            fs::copy(src, &dst).map_err(|source| OutputError::CopyFrame {
                src: src.clone(),
                dst: dst.clone(),
                source,
            })?;

            events.copy(CopyEvent::FrameCopied {
                src: src.clone(),
                dst,
            });
        }

        events.copy(CopyEvent::Completed {
            total_copied: retained.len(),
        });

        Ok(())
    }

    /// Report a fatal error on the event channel before propagating it
    fn fail(&self, events: &EventSender, error: impl Into<FrameDedupError>) -> FrameDedupError {
        let error = error.into();
        events.pipeline(PipelineEvent::Error {
            message: error.to_string(),
        });
        error
    }
}
