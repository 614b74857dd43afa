//! Error types for the Claim Desk client.
//!
//! - [`SlotError`] - document set mutations
//! - [`FileError`] - reading local files for upload
//! - [`ClientError`] - talking to the claims backend
//! - [`CliError`] - top-level command errors
//!
//! Conversion is via `From`, so `?` works across the layers.

use thiserror::Error;

// =============================================================================
// Document Set Errors
// =============================================================================

/// Errors from mutating a [`crate::slots::DocumentSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// No slot with this id in the layout.
    #[error("Unknown document slot: {0}")]
    UnknownSlot(String),

    /// Removal index past the end of a multi-file slot.
    #[error("No file at index {index} in slot '{slot}' ({len} file(s))")]
    IndexOutOfRange { slot: String, index: usize, len: usize },

    /// Multi-file slots need to know which file to remove.
    #[error("Slot '{0}' holds several files; an index is required")]
    MissingIndex(String),
}

// =============================================================================
// Local File Errors
// =============================================================================

/// Errors while loading files from disk.
#[derive(Debug, Error)]
pub enum FileError {
    /// Failed to read file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Extension not in the slot's allow-list.
    #[error("'{name}' is not an accepted file type (accepted: {accepted})")]
    NotAccepted { name: String, accepted: String },
}

// =============================================================================
// Backend Client Errors
// =============================================================================

/// Errors from the claims backend.
///
/// The claim flow never surfaces these: they are folded into a failed
/// [`crate::api::ClaimResult`]. Workshop and Q&A callers see them directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Connection, DNS or timeout failure.
    #[error("Error connecting to backend: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("Backend error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Body could not be decoded into the expected shape.
    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    /// Backend answered but reported a failure or omitted the report.
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// Required documents are missing.
    #[error("Upload {remaining} more required document(s)")]
    NotReady { remaining: usize },

    /// Blank question.
    #[error("Please enter a question")]
    EmptyQuestion,
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Top-level errors returned by the `claimdesk` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Document error: {0}")]
    Slot(#[from] SlotError),

    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for document set operations.
pub type SlotResult<T> = Result<T, SlotError>;

/// Result type for backend calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let slot_err = SlotError::UnknownSlot("passport".into());
        let cli_err: CliError = slot_err.into();
        assert!(cli_err.to_string().contains("passport"));

        let client_err = ClientError::NotReady { remaining: 2 };
        let cli_err: CliError = client_err.into();
        assert_eq!(cli_err.to_string(), "Upload 2 more required document(s)");
    }

    #[test]
    fn test_index_error_format() {
        let err = SlotError::IndexOutOfRange {
            slot: "damaged_photos".into(),
            index: 7,
            len: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 7"));
        assert!(msg.contains("damaged_photos"));
        assert!(msg.contains("3 file(s)"));
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Decode(_)));
    }
}
