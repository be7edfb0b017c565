//! Per-domain extractors over the raw event stream.
//!
//! Each extractor reads an immutable view of the loaded events (or a
//! grouping of them) and returns a freshly built, time-ordered collection:
//! - Actions from before/after/log triples
//! - Console messages
//! - Errors (raw events merged with failed actions)
//! - Network requests from the separate network log
//! - Session metadata
//! - Screencast frames

pub mod actions;
pub mod console;
pub mod errors;
pub mod metadata;
pub mod network;
pub mod screenshots;

// Re-export main functions
pub use actions::extract_actions;
pub use console::extract_console_messages;
pub use errors::extract_errors;
pub use metadata::{extract_metadata, time_span};
pub use network::extract_network_requests;
pub use screenshots::extract_screenshots;
