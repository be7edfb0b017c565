//! Domain records reconstructed from a trace.
//!
//! These are the typed, time-ordered views handed to formatters.
//! Field names are stable: they form the JSON output schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Viewport size from the context options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Session-wide metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMetadata {
    pub browser_name: String,
    pub channel: Option<String>,
    pub platform: String,
    /// Version of the automation tool that recorded the trace
    pub tool_version: Option<String>,
    pub sdk_language: Option<String>,
    pub title: Option<String>,
    pub wall_time: f64,
    pub base_url: Option<String>,
    pub viewport: Option<Viewport>,
    /// Earliest timestamp in the trace (origin for screenshot names)
    pub start_time: f64,
    /// Latest minus earliest timestamp across every event
    pub duration_ms: f64,
}

/// Message logged while an action ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub time: f64,
    pub message: String,
}

/// Error reported by a failed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    pub message: String,
    pub stack: Option<String>,
}

/// One automation call, joined from its before/after/log events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub call_id: String,
    pub title: Option<String>,
    pub class_name: String,
    pub method: String,
    pub params: Value,
    pub start_time: f64,
    /// Absent if the call never completed
    pub end_time: Option<f64>,
    pub page_id: Option<String>,
    pub error: Option<ActionError>,
    pub log_messages: Vec<LogMessage>,
}

impl Action {
    pub fn duration_ms(&self) -> Option<f64> {
        self.end_time.map(|end| end - self.start_time)
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Title if recorded, otherwise `Class.method`
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{}.{}", self.class_name, self.method),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub url: String,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub time: f64,
    pub page_id: Option<String>,
    /// Free-text category: error, warning, log, ...
    pub message_type: String,
    pub text: String,
    pub location: SourceLocation,
}

/// One recorded network exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub method: String,
    pub url: String,
    pub status: i64,
    pub status_text: String,
    pub failure_text: Option<String>,
    pub was_aborted: bool,
    pub duration_ms: f64,
    pub response_size: i64,
    pub content_type: Option<String>,
}

impl NetworkRequest {
    /// A request failed if the server answered with an error status
    /// or the browser reported a failure (either one suffices)
    pub fn is_failed(&self) -> bool {
        self.status >= 400 || self.failure_text.is_some()
    }
}

/// Where an error record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Error,
    PageError,
    ActionError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Error => "error",
            ErrorKind::PageError => "page-error",
            ErrorKind::ActionError => "action-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceError {
    pub time: f64,
    pub error_type: ErrorKind,
    pub message: String,
    pub stack: Option<String>,
    pub page_id: Option<String>,
}

/// Screencast frame reference (image bytes stay in the archive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreencastFrame {
    pub timestamp: f64,
    pub page_id: String,
    /// Content hash addressing the resource in the archive
    pub sha1: String,
    pub width: u32,
    pub height: u32,
}

/// Everything extracted from one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    pub metadata: TraceMetadata,
    pub actions: Vec<Action>,
    pub console_messages: Vec<ConsoleMessage>,
    pub network_requests: Vec<NetworkRequest>,
    pub errors: Vec<TraceError>,
    pub screenshots: Vec<ScreencastFrame>,
}
