//! Error extraction.
//!
//! Three sources are merged in a fixed order: top-level "error" events,
//! page errors, then one record per failed action. The final stable sort
//! by time keeps that order for records sharing a timestamp.

use crate::parser::events::{ErrorEvent, EventKind, RawEvent};
use crate::parser::schema::{Action, ErrorKind, TraceError};
use log::debug;

/// Merge raw error events and failed actions into one timeline
///
/// **Public** - main entry point for error extraction
///
/// # Arguments
/// * `events` - Loaded raw events (time-ordered)
/// * `actions` - Reconstructed actions
///
/// # Returns
/// Errors stable-sorted by time; ties keep error, page-error, action-error order
pub fn extract_errors(events: &[RawEvent], actions: &[Action]) -> Vec<TraceError> {
    let top_level = events.iter().filter_map(|event| match &event.kind {
        EventKind::Error(error) => Some(from_event(event, error, ErrorKind::Error)),
        _ => None,
    });

    let page_level = events.iter().filter_map(|event| match &event.kind {
        EventKind::PageError(error) => Some(from_event(event, error, ErrorKind::PageError)),
        _ => None,
    });

    let from_actions = actions.iter().filter_map(|action| {
        action.error.as_ref().map(|error| TraceError {
            time: action.start_time,
            error_type: ErrorKind::ActionError,
            message: error.message.clone(),
            stack: error.stack.clone(),
            page_id: action.page_id.clone(),
        })
    });

    let mut errors: Vec<TraceError> = top_level.chain(page_level).chain(from_actions).collect();
    errors.sort_by(|a, b| a.time.total_cmp(&b.time));

    debug!("Extracted {} errors", errors.len());
    errors
}

/// **Private** - internal conversion
fn from_event(event: &RawEvent, error: &ErrorEvent, kind: ErrorKind) -> TraceError {
    let payload = error.error.clone().unwrap_or_default();

    TraceError {
        time: event.timestamp.or(error.time).unwrap_or(0.0),
        error_type: kind,
        message: payload.message.unwrap_or_default(),
        stack: payload.stack,
        page_id: event.page_id.clone(),
    }
}
