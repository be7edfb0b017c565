//! Human-readable Markdown reports.

use crate::filters::{console_errors_and_warnings, failed_requests, last_n};
use crate::parser::schema::{
    Action, ConsoleMessage, NetworkRequest, TraceError, TraceMetadata, TraceResult,
};
use chrono::DateTime;
use std::fmt::Write;

/// Render the summary report
///
/// **Public** - Markdown counterpart of `summary_to_json`
///
/// Empty error, console and network sections are omitted.
pub fn summary_to_markdown(trace: &TraceResult, last_actions: usize) -> String {
    let mut sections = vec![metadata_section(&trace.metadata)];

    if !trace.errors.is_empty() {
        sections.push(errors_section(&trace.errors));
    }

    let console = console_errors_and_warnings(&trace.console_messages);
    if !console.is_empty() {
        sections.push(console_errors_section(&console));
    }

    let requests: Vec<&NetworkRequest> = trace.network_requests.iter().collect();
    let failed = failed_requests(&requests);
    if !failed.is_empty() {
        sections.push(failed_requests_section(&failed));
    }

    sections.push(action_timeline_section(&trace.actions, last_actions));
    sections.join("\n\n")
}

pub fn format_metadata(metadata: &TraceMetadata) -> String {
    metadata_section(metadata)
}

/// Full action listing with params, errors and logs
pub fn format_actions(actions: &[&Action]) -> String {
    let mut out = String::from("# Actions\n\n");

    for action in actions {
        let status = if action.is_failed() { "❌ FAILED" } else { "✓" };
        let _ = writeln!(
            out,
            "## {} {}.{}{}",
            status,
            action.class_name,
            action.method,
            duration_suffix(action)
        );
        let _ = writeln!(out, "**Call ID:** {}", action.call_id);

        if let Some(title) = &action.title {
            let _ = writeln!(out, "**Title:** {}", title);
        }
        if let Some(page_id) = &action.page_id {
            let _ = writeln!(out, "**Page:** {}", page_id);
        }
        if has_params(action) {
            let _ = writeln!(out, "**Params:** `{}`", action.params);
        }

        if let Some(error) = &action.error {
            let _ = writeln!(out, "\n**Error:** {}", error.message);
            if let Some(stack) = &error.stack {
                let _ = writeln!(out, "```\n{}\n```", stack);
            }
        }

        if !action.log_messages.is_empty() {
            out.push_str("\n**Logs:**\n");
            for log in &action.log_messages {
                let _ = writeln!(out, "- {}", log.message);
            }
        }

        out.push('\n');
    }

    out
}

pub fn format_console(messages: &[&ConsoleMessage]) -> String {
    let mut out = String::from("# Console Messages\n\n");

    for message in messages {
        let _ = writeln!(
            out,
            "## [{}] {}",
            message.message_type.to_uppercase(),
            message.text
        );
        let _ = writeln!(out, "**Location:** {}", message.location.url);
        if let Some(line) = message.location.line_number {
            let _ = writeln!(out, "**Line:** {}", line);
        }
        out.push('\n');
    }

    out
}

pub fn format_network(requests: &[&NetworkRequest]) -> String {
    let mut out = String::from("# Network Requests\n\n");

    for request in requests {
        let icon = if request.is_failed() { "❌" } else { "✓" };
        let _ = writeln!(out, "## {} {} {}", icon, request.method, request.url);
        let _ = writeln!(out, "**Status:** {} {}", request.status, request.status_text);
        let _ = writeln!(out, "**Duration:** {:.2}ms", request.duration_ms);
        let _ = writeln!(out, "**Size:** {} bytes", request.response_size);

        if let Some(content_type) = &request.content_type {
            let _ = writeln!(out, "**Content-Type:** {}", content_type);
        }
        if let Some(failure) = &request.failure_text {
            let _ = writeln!(out, "**Failure:** {}", failure);
        }
        if request.was_aborted {
            out.push_str("**Aborted:** yes\n");
        }
        out.push('\n');
    }

    out
}

/// **Private** - shared by the summary and metadata views
fn metadata_section(metadata: &TraceMetadata) -> String {
    let mut lines = vec!["# Metadata".to_string()];
    lines.push(format!("**Browser:** {}", metadata.browser_name));

    if let Some(channel) = &metadata.channel {
        lines.push(format!("**Channel:** {}", channel));
    }
    lines.push(format!("**Platform:** {}", metadata.platform));
    if let Some(version) = &metadata.tool_version {
        lines.push(format!("**Tool Version:** {}", version));
    }
    if let Some(language) = &metadata.sdk_language {
        lines.push(format!("**SDK Language:** {}", language));
    }
    if let Some(title) = &metadata.title {
        lines.push(format!("**Test Title:** {}", title));
    }
    if let Some(recorded) = wall_clock(metadata.wall_time) {
        lines.push(format!("**Recorded:** {}", recorded));
    }
    if let Some(base_url) = &metadata.base_url {
        lines.push(format!("**Base URL:** {}", base_url));
    }
    if let Some(viewport) = &metadata.viewport {
        lines.push(format!("**Viewport:** {}x{}", viewport.width, viewport.height));
    }
    lines.push(format!("**Duration:** {:.2}ms", metadata.duration_ms));

    lines.join("\n")
}

fn errors_section(errors: &[TraceError]) -> String {
    let mut out = String::from("# Errors\n");

    for error in errors {
        let _ = writeln!(out, "## [{}] {}", error.error_type.as_str(), error.message);
        if let Some(stack) = &error.stack {
            let _ = writeln!(out, "```\n{}\n```", stack);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn console_errors_section(messages: &[&ConsoleMessage]) -> String {
    let mut out = String::from("# Console Errors & Warnings\n");

    for message in messages {
        let _ = writeln!(
            out,
            "## [{}] {}",
            message.message_type.to_uppercase(),
            message.text
        );
        let _ = writeln!(out, "**Location:** {}\n", message.location.url);
    }

    out.trim_end().to_string()
}

fn failed_requests_section(requests: &[&NetworkRequest]) -> String {
    let mut out = String::from("# Failed Network Requests\n");

    for request in requests {
        let _ = writeln!(out, "## {} {}", request.method, request.url);
        let _ = writeln!(out, "**Status:** {} {}", request.status, request.status_text);
        if let Some(failure) = &request.failure_text {
            let _ = writeln!(out, "**Failure:** {}", failure);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn action_timeline_section(actions: &[Action], last_actions: usize) -> String {
    let shown = last_n(actions, last_actions);
    let mut lines = vec!["# Action Timeline".to_string()];

    if shown.len() < actions.len() {
        lines.push(format!(
            "*(Showing last {} of {} actions)*\n",
            shown.len(),
            actions.len()
        ));
    }

    for action in shown {
        let status = if action.is_failed() { "❌" } else { "✓" };
        lines.push(format!(
            "- {} {}{}",
            status,
            action.display_name(),
            duration_suffix(action)
        ));

        if let Some(error) = &action.error {
            lines.push(format!("  - **Error:** {}", error.message));
        }
    }

    lines.join("\n")
}

fn duration_suffix(action: &Action) -> String {
    action
        .duration_ms()
        .map(|ms| format!(" ({:.2}ms)", ms))
        .unwrap_or_default()
}

fn has_params(action: &Action) -> bool {
    match &action.params {
        serde_json::Value::Null => false,
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

/// Wall time is milliseconds since the Unix epoch; 0 means unknown
fn wall_clock(wall_time: f64) -> Option<String> {
    if wall_time <= 0.0 {
        return None;
    }
    DateTime::from_timestamp_millis(wall_time as i64).map(|dt| dt.to_rfc3339())
}
