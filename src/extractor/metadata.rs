//! Session metadata extraction.

use crate::parser::events::{ContextOptionsEvent, EventKind, RawEvent};
use crate::parser::index::EventGroups;
use crate::parser::schema::TraceMetadata;
use crate::utils::config::UNKNOWN;
use serde_json::Value;

/// Build metadata from the first context-options event
///
/// **Public** - main entry point for metadata extraction
///
/// Never fails: without a context-options event every field takes its
/// default. Start time and duration always cover the entire event stream.
///
/// # Arguments
/// * `type_groups` - Events grouped by type
/// * `events` - Every loaded raw event
pub fn extract_metadata(type_groups: &EventGroups<'_>, events: &[RawEvent]) -> TraceMetadata {
    let context = type_groups
        .get("context-options")
        .iter()
        .find_map(|event| match &event.kind {
            EventKind::ContextOptions(options) => Some(options.clone()),
            _ => None,
        })
        .unwrap_or_default();

    let (start_time, duration_ms) = time_span(events);
    let options = context.context_options.clone().unwrap_or_default();

    TraceMetadata {
        browser_name: name_of(context.browser.as_ref()),
        channel: browser_channel(&context),
        platform: name_of(context.platform.as_ref()),
        tool_version: context.version.as_ref().and_then(stringify),
        sdk_language: context.sdk_language,
        title: context.title,
        wall_time: context.wall_time.unwrap_or(0.0),
        base_url: options.base_url,
        viewport: options.viewport,
        start_time,
        duration_ms,
    }
}

/// Earliest timestamp and max-minus-min span over every timestamped event
///
/// **Public** - also used to anchor screenshot file names
///
/// A zero timestamp counts as unset, like a missing one.
pub fn time_span(events: &[RawEvent]) -> (f64, f64) {
    let mut stamps = events
        .iter()
        .filter_map(|event| event.timestamp)
        .filter(|&t| t != 0.0);

    let Some(first) = stamps.next() else {
        return (0.0, 0.0);
    };

    let (min, max) = stamps.fold((first, first), |(min, max), t| (min.min(t), max.max(t)));
    (min, max - min)
}

/// Pull a `name` out of an object, or stringify a scalar
///
/// **Private** - internal helper for browser/platform fields
fn name_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(obj)) => obj.get("name").and_then(stringify),
        Some(other) => stringify(other),
        None => None,
    }
    .unwrap_or_else(|| UNKNOWN.to_string())
}

fn browser_channel(context: &ContextOptionsEvent) -> Option<String> {
    match &context.browser {
        Some(Value::Object(obj)) => obj.get("channel").and_then(stringify),
        _ => None,
    }
}

/// Render a scalar as text; null and empty strings count as absent
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
