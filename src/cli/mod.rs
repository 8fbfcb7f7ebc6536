//! # CLI Module
//!
//! Command-line interface for the frame deduplicator.
//!
//! ## Usage
//! ```bash
//! # Filter a frame dump into ./filtered
//! frame-dedup filter ./frames
//!
//! # More aggressive filtering, custom output directory
//! frame-dedup filter ./frames --threshold 25000 --out distinct
//!
//! # JSON output for scripting
//! frame-dedup filter ./frames --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use frame_dedup::core::dedup::DedupConfig;
use frame_dedup::core::pipeline::{Pipeline, PipelineResult};
use frame_dedup::core::scanner::ScanConfig;
use frame_dedup::error::Result;
use frame_dedup::events::{DedupEvent, Event, EventChannel, PipelineEvent, ScanEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// Frame Dedup - keep one frame per scene
#[derive(Parser, Debug)]
#[command(name = "frame-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter near-duplicate frames out of a directory
    Filter {
        /// Directory containing the frame dump
        source: PathBuf,

        /// Directory retained frames are copied to
        #[arg(short = 'f', long, default_value = "filtered")]
        out: PathBuf,

        /// Common resolution frames are resized to, as WIDTHxHEIGHT
        #[arg(short, long, default_value = "1152x864", value_parser = parse_resolution)]
        resolution: (u32, u32),

        /// Similarity threshold: scores below this mean duplicate
        /// (higher = more aggressive filtering)
        #[arg(short = 's', long, default_value = "10000")]
        threshold: f64,

        /// Gaussian blur radii applied in order, comma-separated
        #[arg(short = 'g', long, default_value = "3,3", value_delimiter = ',')]
        blur: Vec<u32>,

        /// Minimum changed-region size in pixels that counts toward the score
        #[arg(short = 'm', long, default_value = "500")]
        min_region_area: u32,

        /// Per-pixel difference below this is treated as noise
        #[arg(long, default_value = "45")]
        pixel_threshold: u8,

        /// Only consider files with this extension (e.g. png)
        #[arg(short, long)]
        extension: Option<String>,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (retained paths only)
    Minimal,
}

fn parse_resolution(value: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width '{w}'"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height '{h}'"))?;
    Ok((width, height))
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            source,
            out,
            resolution,
            threshold,
            blur,
            min_region_area,
            pixel_threshold,
            extension,
            include_hidden,
            output,
            verbose,
        } => {
            let dedup_config = DedupConfig {
                target_resolution: resolution,
                smoothing_radii: blur,
                similarity_threshold: threshold,
                min_region_area,
                pixel_threshold,
            };

            let scan_config = ScanConfig {
                include_hidden,
                extensions: extension.map(|e| vec![e]),
                ..Default::default()
            };

            run_filter(source, out, dedup_config, scan_config, output, verbose)
        }
    }
}

fn run_filter(
    source: PathBuf,
    out: PathBuf,
    dedup_config: DedupConfig,
    scan_config: ScanConfig,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    // Print header
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Frame Dedup").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder(&source)
        .output_dir(&out)
        .dedup_config(dedup_config)
        .scan_config(scan_config)
        .build()?;

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("{}", phase));
                    }
                }
                Event::Scan(ScanEvent::Completed { total_frames }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_frames as u64);
                    }
                }
                Event::Dedup(DedupEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.completed as u64);
                        if verbose_clone {
                            pb.set_message(format!(
                                "{} (kept: {})",
                                p.current_path
                                    .file_name()
                                    .unwrap_or_default()
                                    .to_string_lossy(),
                                p.retained
                            ));
                        }
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let result = result?;

    // Output results
    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result),
        OutputFormat::Json => print_json_results(&result),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult) {
    term.write_line("").ok();
    term.write_line(&format!("{} Filtering Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    // Summary
    term.write_line(&format!(
        "  {} frames scanned in {:.1}s",
        style(result.total_frames).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} unique frames kept",
        style(result.retained.len()).cyan()
    ))
    .ok();

    term.write_line(&format!(
        "  {} duplicates discarded",
        style(result.discarded).yellow()
    ))
    .ok();

    term.write_line("").ok();

    if result.retained.is_empty() {
        term.write_line(&format!("  {} No frames found!", style("∅").dim()))
            .ok();
        return;
    }

    term.write_line(&format!("{}", style("Kept frames:").bold().underlined()))
        .ok();

    for path in &result.retained {
        term.write_line(&format!("  {} {}", style("★").green(), display_path(path)))
            .ok();
    }

    if let Some(ref output_dir) = result.output_dir {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style(format!("Copied to {}", display_path(output_dir))).dim()
        ))
        .ok();
    }
}

fn display_path(path: &Path) -> String {
    let home = dirs::home_dir().unwrap_or_default();
    if path.starts_with(&home) {
        match path.strip_prefix(&home) {
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    } else {
        path.display().to_string()
    }
}

fn print_json_results(result: &PipelineResult) {
    let output = serde_json::json!({
        "total_frames": result.total_frames,
        "retained_count": result.retained.len(),
        "discarded": result.discarded,
        "duration_ms": result.duration_ms,
        "output_dir": result.output_dir,
        "retained": result.retained,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(result: &PipelineResult) {
    for path in &result.retained {
        println!("{}", path.display());
    }
}
