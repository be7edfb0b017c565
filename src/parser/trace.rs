//! Trace assembly.
//!
//! Loads the raw event stream once, indexes it, and runs every extractor
//! over the same immutable snapshot to build a [`TraceResult`].

use super::archive::TraceArchive;
use super::events::load_events;
use super::index::{group_by_call_id, group_by_type};
use super::schema::TraceResult;
use crate::extractor::{
    extract_actions, extract_console_messages, extract_errors, extract_metadata,
    extract_network_requests, extract_screenshots,
};
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Parse a trace archive from disk
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `path` - Path to the trace zip
///
/// # Returns
/// The archive (kept for on-demand resource access) and the parsed trace
///
/// # Errors
/// * `ParseError::Io` / `ParseError::Archive` - archive unreadable
/// * `ParseError::MalformedLine` / `ParseError::InvalidFormat` - bad event line
pub fn parse_trace_file(path: impl AsRef<Path>) -> Result<(TraceArchive, TraceResult), ParseError> {
    let archive = TraceArchive::open(path)?;
    let trace = parse_trace(&archive)?;
    Ok((archive, trace))
}

/// Run every extractor over an already-opened archive
///
/// **Public** - assembles the aggregate result
///
/// # Errors
/// Only structural problems fail; see [`ParseError`]
pub fn parse_trace(archive: &TraceArchive) -> Result<TraceResult, ParseError> {
    let events = load_events(archive)?;
    debug!("Loaded {} raw events", events.len());

    let type_groups = group_by_type(&events);
    let call_groups = group_by_call_id(&events);
    debug!(
        "Indexed {} event types and {} call ids",
        type_groups.len(),
        call_groups.len()
    );

    let metadata = extract_metadata(&type_groups, &events);
    let actions = extract_actions(&call_groups);
    let console_messages = extract_console_messages(&type_groups);
    let network_requests = extract_network_requests(archive)?;
    let errors = extract_errors(&events, &actions);
    let screenshots = extract_screenshots(&type_groups);

    Ok(TraceResult {
        metadata,
        actions,
        console_messages,
        network_requests,
        errors,
        screenshots,
    })
}
