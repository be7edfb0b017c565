use crate::utils::config::{DEFAULT_DEDUP_THRESHOLD, DEFAULT_SCREENSHOT_DIR, DEFAULT_SUMMARY_ACTIONS};
use clap::ValueEnum;
use std::path::PathBuf;

/// Rendering for report commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Which view of the trace a report command renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    /// Metadata, errors, console problems, failed requests, recent actions
    Summary { last: usize },
    Actions { errors_only: bool },
    Console { level: Option<String> },
    Network {
        failed_only: bool,
        ignore_pattern: Option<String>,
    },
    Metadata,
}

/// Arguments for the report commands
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Trace archive to analyze
    pub trace_file: PathBuf,

    pub format: OutputFormat,

    /// Restrict page-scoped records to this page id
    pub page: Option<String>,

    pub kind: ReportKind,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from("trace.zip"),
            format: OutputFormat::Json,
            page: None,
            kind: ReportKind::Summary {
                last: DEFAULT_SUMMARY_ACTIONS,
            },
        }
    }
}

/// Arguments for the screenshots command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ScreenshotArgs {
    /// Trace archive to extract from
    pub trace_file: PathBuf,

    /// Directory receiving the image files
    pub output_dir: PathBuf,

    /// Only frames from this page
    pub page: Option<String>,

    /// Only the frame closest to each action's completion
    pub action_only: bool,

    /// Drop frames that look like the last kept one
    pub dedup: bool,

    /// Fraction of differing pixels at or above which a frame is kept
    pub threshold: f64,

    /// Keep only the last N frames (0 = all)
    pub limit: usize,
}

impl Default for ScreenshotArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from("trace.zip"),
            output_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            page: None,
            action_only: false,
            dedup: false,
            threshold: DEFAULT_DEDUP_THRESHOLD,
            limit: 0,
        }
    }
}
