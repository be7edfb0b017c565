//! JSON rendering of extracted trace data.

use crate::filters::{console_errors_and_warnings, failed_requests, last_n};
use crate::parser::schema::{
    Action, ConsoleMessage, NetworkRequest, TraceError, TraceMetadata, TraceResult,
};
use crate::utils::error::OutputError;
use serde::Serialize;

/// High-level overview of a trace
#[derive(Debug, Serialize)]
pub struct TraceSummary<'a> {
    pub metadata: &'a TraceMetadata,
    pub errors: &'a [TraceError],
    pub console_errors_warnings: Vec<&'a ConsoleMessage>,
    pub failed_network_requests: Vec<&'a NetworkRequest>,
    pub action_timeline: &'a [Action],
}

impl<'a> TraceSummary<'a> {
    /// Build a summary with the last `last_actions` actions (0 for all)
    pub fn new(trace: &'a TraceResult, last_actions: usize) -> Self {
        let requests: Vec<&NetworkRequest> = trace.network_requests.iter().collect();

        Self {
            metadata: &trace.metadata,
            errors: &trace.errors,
            console_errors_warnings: console_errors_and_warnings(&trace.console_messages),
            failed_network_requests: failed_requests(&requests),
            action_timeline: last_n(&trace.actions, last_actions),
        }
    }
}

/// Pretty-print any serializable record or collection
///
/// **Public** - used by every JSON-producing command
///
/// # Errors
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(OutputError::SerializationFailed)
}

/// Render the summary view as JSON
pub fn summary_to_json(trace: &TraceResult, last_actions: usize) -> Result<String, OutputError> {
    to_json(&TraceSummary::new(trace, last_actions))
}
