//! Screencast frame extraction.

use crate::parser::events::EventKind;
use crate::parser::index::EventGroups;
use crate::parser::schema::ScreencastFrame;
use log::debug;

/// Collect one frame per "screencast-frame" event, sorted by timestamp
///
/// **Public** - main entry point for frame extraction
pub fn extract_screenshots(type_groups: &EventGroups<'_>) -> Vec<ScreencastFrame> {
    let mut frames: Vec<ScreencastFrame> = type_groups
        .get("screencast-frame")
        .iter()
        .filter_map(|event| match &event.kind {
            EventKind::ScreencastFrame(frame) => Some(ScreencastFrame {
                timestamp: event.timestamp.unwrap_or(0.0),
                page_id: event.page_id.clone().unwrap_or_default(),
                sha1: frame.sha1.clone().unwrap_or_default(),
                width: frame.width.unwrap_or(0),
                height: frame.height.unwrap_or(0),
            }),
            _ => None,
        })
        .collect();

    frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    debug!("Extracted {} screencast frames", frames.len());
    frames
}
