//! Action reconstruction from before/after/log event triples.

use crate::parser::events::{EventKind, RawEvent};
use crate::parser::index::EventGroups;
use crate::parser::schema::{Action, ActionError, LogMessage};
use log::debug;
use serde_json::{Map, Value};

/// Rebuild one action per call identifier
///
/// **Public** - main entry point for action extraction
///
/// A group without a "before" event yields nothing. When several "after"
/// events share a call id the first one wins.
///
/// # Arguments
/// * `call_groups` - Events grouped by call identifier
///
/// # Returns
/// Actions stable-sorted by start time
pub fn extract_actions(call_groups: &EventGroups<'_>) -> Vec<Action> {
    let mut actions: Vec<Action> = call_groups
        .iter()
        .filter_map(|(call_id, events)| build_action(call_id, events))
        .collect();

    actions.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    debug!(
        "Reconstructed {} actions from {} call groups",
        actions.len(),
        call_groups.len()
    );
    actions
}

/// Join the events of one call group into an action
///
/// **Private** - internal helper for extract_actions
fn build_action(call_id: &str, events: &[&RawEvent]) -> Option<Action> {
    let (before, page_id) = events.iter().find_map(|event| match &event.kind {
        EventKind::Before(before) => Some((before, event.page_id.clone())),
        _ => None,
    })?;

    let after = events.iter().find_map(|event| match &event.kind {
        EventKind::After(after) => Some(after),
        _ => None,
    });

    let log_messages = events
        .iter()
        .filter_map(|event| match &event.kind {
            EventKind::Log(log) => Some(LogMessage {
                time: log.time.unwrap_or(0.0),
                message: log.message.clone().unwrap_or_default(),
            }),
            _ => None,
        })
        .collect();

    let error = after
        .and_then(|after| after.error.as_ref())
        .filter(|payload| !payload.is_empty())
        .map(|payload| ActionError {
            message: payload.message.clone().unwrap_or_default(),
            stack: payload.stack.clone(),
        });

    Some(Action {
        call_id: call_id.to_string(),
        title: before.title.clone(),
        class_name: before.class_name.clone().unwrap_or_default(),
        method: before.method.clone().unwrap_or_default(),
        params: before
            .params
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new())),
        start_time: before.start_time.unwrap_or(0.0),
        end_time: after.and_then(|after| after.end_time),
        page_id,
        error,
        log_messages,
    })
}
