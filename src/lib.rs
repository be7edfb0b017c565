//! Trace Analyzer
//!
//! Inspect browser-automation trace archives without a graphical viewer.
//!
//! A trace archive is a zip container holding newline-delimited JSON event
//! logs, a network log, and binary resources. This crate rebuilds typed,
//! time-ordered views of the recorded run from it: the action timeline,
//! console messages, network requests, errors, and screencast frames.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-analyzer summary trace.zip --format markdown
//! trace-analyzer screenshots trace.zip --action-only --dedup
//! ```
//!
//! As a library:
//!
//! ```ignore
//! let (archive, trace) = trace_analyzer::parser::parse_trace_file("trace.zip")?;
//! for action in &trace.actions {
//!     println!("{} {:?}", action.display_name(), action.duration_ms());
//! }
//! ```

pub mod commands;
pub mod extractor;
pub mod filters;
pub mod output;
pub mod parser;
pub mod screencast;
pub mod utils;
