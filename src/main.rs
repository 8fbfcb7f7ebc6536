//! # frame-dedup CLI
//!
//! Command-line interface for the frame deduplicator.
//!
//! ## Usage
//! ```bash
//! frame-dedup filter ./frames --threshold 10000
//! frame-dedup filter ./frames --out distinct --output json
//! ```

mod cli;

use frame_dedup::Result;

fn main() -> Result<()> {
    frame_dedup::init_tracing();
    cli::run()
}
