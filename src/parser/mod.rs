//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading the trace archive into memory
//! - Decoding newline-delimited JSON events into typed payloads
//! - Indexing events by type and call identifier
//! - Assembling the extracted records into one result

pub mod archive;
pub mod events;
pub mod index;
pub mod schema;
pub mod trace;

// Re-export main types
pub use archive::{ArchiveMember, TraceArchive};
pub use events::{load_events, EventKind, RawEvent};
pub use index::{group_by_call_id, group_by_type, EventGroups};
pub use schema::{
    Action, ActionError, ConsoleMessage, ErrorKind, LogMessage, NetworkRequest, ScreencastFrame,
    SourceLocation, TraceError, TraceMetadata, TraceResult, Viewport,
};
pub use trace::{parse_trace, parse_trace_file};
