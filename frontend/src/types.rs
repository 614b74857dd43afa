//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Files** - Browser file handle for the document model
//! - **Chat** - Policy Q&A history entries
//! - **Error Types** - Frontend error handling

use std::fmt;

use claimdesk::{ClientError, DebugInfo, FileHandle};

// =============================================================================
// Files
// =============================================================================

/// A file picked or dropped by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserFile(pub web_sys::File);

impl BrowserFile {
    pub fn as_blob(&self) -> &web_sys::Blob {
        &self.0
    }
}

impl FileHandle for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// Collect a `FileList` from an input or a drop.
pub fn files_from_list(list: Option<web_sys::FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile)
        .collect()
}

/// `"2.4 MB"`, `"512 KB"`.
pub fn format_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{} KB", (bytes / 1024).max(1))
    }
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the Q&A history.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Local time (HH:MM:SS)
    pub timestamp: String,
    pub debug: Option<DebugInfo>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp: now(),
            debug: None,
        }
    }

    pub fn assistant(text: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            timestamp: now(),
            debug,
        }
    }
}

fn now() -> String {
    js_sys::Date::new_0()
        .to_locale_time_string("en-GB")
        .as_string()
        .unwrap_or_else(|| "00:00:00".to_string())
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Network/HTTP error.
    Network(String),
    /// Backend answered but the answer is unusable.
    Backend(String),
    /// Input not ready to submit.
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Backend(msg) => write!(f, "{}", msg),
            AppError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(msg) => AppError::Network(msg),
            ClientError::Status { status, body } => AppError::Network(format!("Server error ({}): {}", status, body)),
            ClientError::Rejected(msg) => AppError::Backend(msg),
            e @ ClientError::Decode(_) => AppError::Backend(e.to_string()),
            e @ (ClientError::NotReady { .. } | ClientError::EmptyQuestion) => AppError::Validation(e.to_string()),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(200), "1 KB");
        assert_eq!(format_size(512 * 1024), "512 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_client_errors_map_to_app_errors() {
        assert_eq!(
            AppError::from(ClientError::Transport("offline".into())),
            AppError::Network("offline".into())
        );
        assert!(matches!(
            AppError::from(ClientError::Status { status: 502, body: "bad gateway".into() }),
            AppError::Network(msg) if msg.contains("502")
        ));
        assert_eq!(
            AppError::from(ClientError::NotReady { remaining: 2 }).to_string(),
            "Upload 2 more required document(s)"
        );
    }
}
