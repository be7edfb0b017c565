//! Screencast frame selection.
//!
//! This module handles:
//! - Joining frames to the action active on the same page
//! - Perceptual deduplication against the last retained frame

pub mod correlate;
pub mod dedup;

// Re-export main functions
pub use correlate::filter_action_frames;
pub use dedup::{deduplicate_frames, is_similar, pixel_difference};
