//! Post-parse filters over the extracted collections.
//!
//! All filters borrow from an already-built trace; nothing is re-parsed.

use crate::parser::schema::{
    Action, ConsoleMessage, NetworkRequest, ScreencastFrame, TraceError,
};
use regex::Regex;

pub fn actions_for_page<'a>(actions: &'a [Action], page_id: &str) -> Vec<&'a Action> {
    actions
        .iter()
        .filter(|action| action.page_id.as_deref() == Some(page_id))
        .collect()
}

pub fn failed_actions<'a>(actions: &[&'a Action]) -> Vec<&'a Action> {
    actions.iter().copied().filter(|action| action.is_failed()).collect()
}

pub fn console_for_page<'a>(
    messages: &'a [ConsoleMessage],
    page_id: &str,
) -> Vec<&'a ConsoleMessage> {
    messages
        .iter()
        .filter(|message| message.page_id.as_deref() == Some(page_id))
        .collect()
}

/// Messages whose type matches `level` exactly
pub fn console_with_level<'a>(
    messages: &[&'a ConsoleMessage],
    level: &str,
) -> Vec<&'a ConsoleMessage> {
    messages
        .iter()
        .copied()
        .filter(|message| message.message_type == level)
        .collect()
}

pub fn console_errors_and_warnings(messages: &[ConsoleMessage]) -> Vec<&ConsoleMessage> {
    messages
        .iter()
        .filter(|message| matches!(message.message_type.as_str(), "error" | "warning"))
        .collect()
}

pub fn errors_for_page<'a>(errors: &'a [TraceError], page_id: &str) -> Vec<&'a TraceError> {
    errors
        .iter()
        .filter(|error| error.page_id.as_deref() == Some(page_id))
        .collect()
}

pub fn frames_for_page(frames: &[ScreencastFrame], page_id: &str) -> Vec<ScreencastFrame> {
    frames
        .iter()
        .filter(|frame| frame.page_id == page_id)
        .cloned()
        .collect()
}

/// Requests with an error status or a browser-reported failure
pub fn failed_requests<'a>(requests: &[&'a NetworkRequest]) -> Vec<&'a NetworkRequest> {
    requests
        .iter()
        .copied()
        .filter(|request| request.is_failed())
        .collect()
}

/// Drop requests whose URL contains a match for `pattern`
pub fn exclude_urls<'a>(
    requests: &[&'a NetworkRequest],
    pattern: &Regex,
) -> Vec<&'a NetworkRequest> {
    requests
        .iter()
        .copied()
        .filter(|request| !pattern.is_match(&request.url))
        .collect()
}

/// Trailing `n` items, or everything when `n` is 0
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    if n == 0 || items.len() <= n {
        items
    } else {
        &items[items.len() - n..]
    }
}
