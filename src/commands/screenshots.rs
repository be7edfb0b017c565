//! Screenshots command implementation.
//!
//! The screenshots command:
//! 1. Parses the trace archive
//! 2. Narrows frames to one page (optional)
//! 3. Keeps one frame per completed action (optional)
//! 4. Drops visually redundant frames (optional)
//! 5. Keeps the last N frames (optional)
//! 6. Writes the images to disk

use super::models::ScreenshotArgs;
use crate::filters::{frames_for_page, last_n};
use crate::output::export_frames;
use crate::parser::archive::TraceArchive;
use crate::parser::parse_trace_file;
use crate::parser::schema::{ScreencastFrame, TraceResult};
use crate::screencast::{deduplicate_frames, filter_action_frames};
use anyhow::{Context, Result};
use log::{debug, info};

/// Execute the screenshots command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Number of image files written
pub fn execute_screenshots(args: &ScreenshotArgs) -> Result<usize> {
    validate_screenshot_args(args)?;

    info!("Parsing trace: {}", args.trace_file.display());
    let (archive, trace) = parse_trace_file(&args.trace_file)
        .with_context(|| format!("Failed to parse trace {}", args.trace_file.display()))?;

    let frames = select_frames(&trace, &archive, args);
    debug!("Selected {} of {} frames", frames.len(), trace.screenshots.len());

    let written = export_frames(&archive, &frames, trace.metadata.start_time, &args.output_dir)
        .context("Failed to export screenshots")?;

    Ok(written)
}

/// Run the frame selection pipeline without writing anything
///
/// **Public** - useful for previews and tests
pub fn select_frames(
    trace: &TraceResult,
    archive: &TraceArchive,
    args: &ScreenshotArgs,
) -> Vec<ScreencastFrame> {
    let mut frames = match &args.page {
        Some(page) => frames_for_page(&trace.screenshots, page),
        None => trace.screenshots.clone(),
    };

    if args.action_only {
        frames = filter_action_frames(&frames, &trace.actions);
    }

    if args.dedup {
        frames = deduplicate_frames(&frames, archive, args.threshold);
    }

    last_n(&frames, args.limit).to_vec()
}

/// Validate screenshot arguments
///
/// **Public** - can be called before execute_screenshots for early validation
pub fn validate_screenshot_args(args: &ScreenshotArgs) -> Result<()> {
    if !args.trace_file.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    if !(0.0..=1.0).contains(&args.threshold) {
        anyhow::bail!("threshold must be between 0 and 1, got {}", args.threshold);
    }

    if args.output_dir.is_file() {
        anyhow::bail!("Output path is a file: {}", args.output_dir.display());
    }

    Ok(())
}
