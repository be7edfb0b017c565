//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod report;
pub mod screenshots;

// Re-export main command functions
pub use models::{OutputFormat, ReportArgs, ReportKind, ScreenshotArgs};
pub use report::{execute_report, render_report, validate_report_args};
pub use screenshots::{execute_screenshots, select_frames, validate_screenshot_args};
