//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that abort trace parsing
///
/// Only structural problems end up here. Missing optional fields,
/// absent resources and undecodable images are tolerated upstream.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Archive unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event in {member} at line {line}: {source}")]
    MalformedLine {
        member: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
