//! Output writers for extracted trace data.
//!
//! This module handles:
//! - JSON rendering (pretty-printed)
//! - Markdown reports
//! - Screenshot export to disk

pub mod json;
pub mod markdown;
pub mod screenshots;

// Re-export main functions
pub use json::{summary_to_json, to_json, TraceSummary};
pub use markdown::{format_actions, format_console, format_metadata, format_network, summary_to_markdown};
pub use screenshots::{export_frames, screenshot_filename};
