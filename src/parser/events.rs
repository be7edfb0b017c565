//! Raw trace events and their typed payloads.
//!
//! Each line of an event log is a JSON object with a `type` discriminator.
//! The envelope fields shared by every event (timestamp, call id, page id)
//! are lifted onto [`RawEvent`]; the rest is decoded into a per-type
//! payload. Optional fields default instead of failing, and a field with
//! the wrong JSON shape falls back on its own, so every typed event keeps
//! its payload. Only unknown types decode to [`EventKind::Other`].

use super::archive::TraceArchive;
use super::schema::Viewport;
use crate::utils::config::EVENTS_SUFFIX;
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One decoded line of the event log
#[derive(Debug, Clone)]
pub struct RawEvent {
    /// Raw `type` discriminator ("" when absent)
    pub event_type: String,
    pub timestamp: Option<f64>,
    pub call_id: Option<String>,
    pub page_id: Option<String>,
    pub kind: EventKind,
}

/// Typed payload of a raw event
#[derive(Debug, Clone)]
pub enum EventKind {
    ContextOptions(ContextOptionsEvent),
    Before(BeforeEvent),
    After(AfterEvent),
    Log(LogEvent),
    Console(ConsoleEvent),
    Error(ErrorEvent),
    PageError(ErrorEvent),
    ScreencastFrame(FrameEvent),
    Other,
}

/// Session-wide options recorded once per context
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextOptionsEvent {
    /// Either `{ "name": .., "channel": .. }` or a bare string
    pub browser: Option<Value>,
    /// Either `{ "name": .. }` or a bare string
    pub platform: Option<Value>,
    pub version: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub sdk_language: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub wall_time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub context_options: Option<ContextOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    #[serde(rename = "baseURL", deserialize_with = "lenient")]
    pub base_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub viewport: Option<Viewport>,
}

/// Start of an automation call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeforeEvent {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "class", deserialize_with = "lenient")]
    pub class_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub start_time: Option<f64>,
}

/// Completion of an automation call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AfterEvent {
    #[serde(deserialize_with = "lenient")]
    pub end_time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub error: Option<ErrorPayload>,
}

/// Progress message logged while a call runs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogEvent {
    #[serde(deserialize_with = "lenient")]
    pub time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleEvent {
    #[serde(deserialize_with = "lenient")]
    pub message_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<ConsoleLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleLocation {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub line_number: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub column_number: Option<u32>,
}

/// Top-level or page-level error
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorEvent {
    #[serde(deserialize_with = "lenient")]
    pub time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub stack: Option<String>,
}

impl ErrorPayload {
    /// True when the payload carries neither message nor stack
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.stack.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameEvent {
    #[serde(deserialize_with = "lenient")]
    pub sha1: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub height: Option<u32>,
}

/// Generic `{"type": "event", "method": .., "params": ..}` wrapper
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WrappedEvent {
    #[serde(deserialize_with = "lenient")]
    method: Option<String>,
    #[serde(deserialize_with = "lenient")]
    time: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    params: Option<WrappedParams>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WrappedParams {
    #[serde(deserialize_with = "lenient")]
    error: Option<ErrorPayload>,
}

/// Decode one optional field, falling back to `None` when its shape is wrong
///
/// **Private** - keeps a mistyped field from discarding its whole event
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match T::deserialize(&value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(e) => {
            debug!("Ignoring mistyped field value {}: {}", value, e);
            Ok(None)
        }
    }
}

/// Non-negative count such as a line number or a pixel dimension
///
/// Whole floats (`1280.0`) are accepted; negatives and fractions are not.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    };

    Ok(count.and_then(|c| u32::try_from(c).ok()))
}

impl RawEvent {
    /// Decode one event from a parsed JSON line
    ///
    /// **Public** - used by the loader and by callers holding parsed JSON
    ///
    /// # Errors
    /// * `ParseError::InvalidFormat` - the line is not a JSON object
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let obj = value.as_object().ok_or_else(|| {
            ParseError::InvalidFormat(format!("Expected a JSON object, found {}", value))
        })?;

        let event_type = obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            timestamp: obj.get("timestamp").and_then(Value::as_f64),
            call_id: string_field(value, "callId"),
            page_id: string_field(value, "pageId"),
            kind: EventKind::decode(&event_type, value),
            event_type,
        })
    }

    /// Sort key used by the loader (missing timestamp sorts as 0)
    pub fn sort_key(&self) -> f64 {
        self.timestamp.unwrap_or(0.0)
    }
}

impl EventKind {
    /// Decode the payload for a given `type`
    ///
    /// **Private** - internal helper for RawEvent::from_value
    fn decode(event_type: &str, value: &Value) -> Self {
        match event_type {
            "context-options" => payload(event_type, value).map_or(Self::Other, Self::ContextOptions),
            "before" => payload(event_type, value).map_or(Self::Other, Self::Before),
            "after" => payload(event_type, value).map_or(Self::Other, Self::After),
            "log" => payload(event_type, value).map_or(Self::Other, Self::Log),
            "console" => payload(event_type, value).map_or(Self::Other, Self::Console),
            "error" => payload(event_type, value).map_or(Self::Other, Self::Error),
            "page-error" => payload(event_type, value).map_or(Self::Other, Self::PageError),
            "screencast-frame" => payload(event_type, value).map_or(Self::Other, Self::ScreencastFrame),
            "event" => decode_wrapped(value),
            _ => Self::Other,
        }
    }
}

/// Unwrap page errors reported through the generic event wrapper
///
/// **Private** - internal helper for EventKind::decode
fn decode_wrapped(value: &Value) -> EventKind {
    let Some(wrapped) = payload::<WrappedEvent>("event", value) else {
        return EventKind::Other;
    };

    match wrapped.method.as_deref() {
        Some("pageError") | Some("pageerror") => EventKind::PageError(ErrorEvent {
            time: wrapped.time,
            error: wrapped.params.and_then(|params| params.error),
        }),
        _ => EventKind::Other,
    }
}

/// Decode a typed payload, demoting shape mismatches to `None`
///
/// **Private** - internal utility
fn payload<T: DeserializeOwned>(event_type: &str, value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!("Ignoring malformed '{}' event payload: {}", event_type, e);
            None
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Split a newline-delimited JSON member into parsed values
///
/// **Public** - shared by the event loader and the network extractor
///
/// Blank lines are skipped. Any other line must be well-formed JSON.
///
/// # Returns
/// Each value paired with its 1-based line number in the member
///
/// # Errors
/// * `ParseError::MalformedLine` - a non-blank line is not valid JSON
pub fn json_lines(member: &str, data: &[u8]) -> Result<Vec<(usize, Value)>, ParseError> {
    data.split(|&byte| byte == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.trim_ascii().is_empty())
        .map(|(index, line)| {
            serde_json::from_slice(line.trim_ascii())
                .map(|value| (index + 1, value))
                .map_err(|source| ParseError::MalformedLine {
                    member: member.to_string(),
                    line: index + 1,
                    source,
                })
        })
        .collect()
}

/// Load every event from the archive's event logs
///
/// **Public** - main entry point of the event loader
///
/// # Arguments
/// * `archive` - Decompressed trace archive
///
/// # Returns
/// Events from all `.trace` members, concatenated in archive order and
/// stable-sorted by timestamp
///
/// # Errors
/// * `ParseError::MalformedLine` - a line is not valid JSON
/// * `ParseError::InvalidFormat` - a line is JSON but not an object
pub fn load_events(archive: &TraceArchive) -> Result<Vec<RawEvent>, ParseError> {
    let mut events = Vec::new();

    for member in archive.members_with_suffix(EVENTS_SUFFIX) {
        let values = json_lines(&member.name, &member.data)?;
        debug!("Read {} events from {}", values.len(), member.name);

        for (line, value) in &values {
            let event = RawEvent::from_value(value).map_err(|e| match e {
                ParseError::InvalidFormat(reason) => ParseError::InvalidFormat(format!(
                    "{} at line {}: {}",
                    member.name, line, reason
                )),
                other => other,
            })?;
            events.push(event);
        }
    }

    events.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::archive::ArchiveMember;
    use serde_json::json;

    fn archive(members: &[(&str, &str)]) -> TraceArchive {
        TraceArchive::from_members(
            members
                .iter()
                .map(|(name, data)| ArchiveMember {
                    name: name.to_string(),
                    data: data.as_bytes().to_vec(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_envelope_fields() {
        let event = RawEvent::from_value(&json!({
            "type": "before",
            "timestamp": 12.5,
            "callId": "call-1",
            "pageId": "page@1",
            "startTime": 10.0,
            "method": "goto"
        }))
        .unwrap();

        assert_eq!(event.event_type, "before");
        assert_eq!(event.timestamp, Some(12.5));
        assert_eq!(event.call_id.as_deref(), Some("call-1"));
        assert_eq!(event.page_id.as_deref(), Some("page@1"));
        assert!(matches!(event.kind, EventKind::Before(ref b) if b.method.as_deref() == Some("goto")));
    }

    #[test]
    fn test_non_object_line_is_rejected() {
        let result = RawEvent::from_value(&json!([1, 2, 3]));
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_mistyped_field_falls_back_alone() {
        let event = RawEvent::from_value(&json!({
            "type": "after",
            "callId": "call-1",
            "endTime": 20.0,
            "error": "not an object"
        }))
        .unwrap();

        match event.kind {
            EventKind::After(after) => {
                assert_eq!(after.end_time, Some(20.0));
                assert!(after.error.is_none());
            }
            other => panic!("expected after payload, got {:?}", other),
        }
        assert_eq!(event.call_id.as_deref(), Some("call-1"));
    }

    #[test]
    fn test_counts_accept_whole_floats_only() {
        let frame = RawEvent::from_value(&json!({
            "type": "screencast-frame",
            "sha1": "abc",
            "width": 1280.0,
            "height": 720.5
        }))
        .unwrap();

        match frame.kind {
            EventKind::ScreencastFrame(frame) => {
                assert_eq!(frame.sha1.as_deref(), Some("abc"));
                assert_eq!(frame.width, Some(1280));
                assert_eq!(frame.height, None);
            }
            other => panic!("expected frame payload, got {:?}", other),
        }
    }

    #[test]
    fn test_wrapped_page_error() {
        let event = RawEvent::from_value(&json!({
            "type": "event",
            "method": "pageError",
            "time": 3000.0,
            "params": { "error": { "message": "Runtime error" } }
        }))
        .unwrap();

        match event.kind {
            EventKind::PageError(err) => {
                assert_eq!(err.time, Some(3000.0));
                assert_eq!(err.error.unwrap().message.as_deref(), Some("Runtime error"));
            }
            other => panic!("expected page error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_wrapped_events_are_ignored() {
        let event = RawEvent::from_value(&json!({ "type": "event", "method": "dialog" })).unwrap();
        assert!(matches!(event.kind, EventKind::Other));
    }

    #[test]
    fn test_json_lines_skips_blank_lines() {
        let values = json_lines("trace.trace", b"{\"a\":1}\n\n  \r\n{\"b\":2}\r\n").unwrap();
        let lines: Vec<usize> = values.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 4]);
    }

    #[test]
    fn test_json_lines_reports_line_number() {
        let err = json_lines("trace.trace", b"{\"a\":1}\n{broken\n").unwrap_err();
        match err {
            ParseError::MalformedLine { member, line, .. } => {
                assert_eq!(member, "trace.trace");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_load_events_sorts_stably_across_members() {
        let archive = archive(&[
            (
                "a.trace",
                "{\"type\":\"x\",\"timestamp\":20}\n{\"type\":\"first-zero\"}\n",
            ),
            (
                "trace.network",
                "{\"type\":\"resource-snapshot\",\"timestamp\":1}\n",
            ),
            (
                "b.trace",
                "{\"type\":\"y\",\"timestamp\":10}\n{\"type\":\"second-zero\",\"timestamp\":0}\n",
            ),
        ]);

        let events = load_events(&archive).unwrap();
        let types: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();

        assert_eq!(types, vec!["first-zero", "second-zero", "y", "x"]);
    }

    #[test]
    fn test_load_events_locates_non_object_line() {
        let archive = archive(&[("trace.trace", "{\"type\":\"x\"}\n\n[1, 2]\n")]);

        match load_events(&archive) {
            Err(ParseError::InvalidFormat(reason)) => {
                assert!(reason.starts_with("trace.trace at line 3:"), "{}", reason);
            }
            other => panic!("expected InvalidFormat, got {:?}", other.map(|e| e.len())),
        }
    }

    #[test]
    fn test_load_events_fails_on_malformed_line() {
        let archive = archive(&[("trace.trace", "{\"type\":\"x\"}\nnot json\n")]);
        assert!(load_events(&archive).is_err());
    }
}
