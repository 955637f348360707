//! Content error types

use folio_core::CoreError;
use thiserror::Error;

/// Errors raised by content lookup, theme persistence and contact submission
#[derive(Error, Debug)]
pub enum ContentError {
    /// Icon name not in the closed icon set
    #[error("Unknown icon: {0}")]
    UnknownIcon(String),

    /// Theme value other than `light` or `dark`
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Contact form field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// Relay credentials are missing or blank
    #[error("Mail relay is not configured (missing {0})")]
    MissingCredential(&'static str),

    /// The relay answered with a non-success status
    #[error("Mail relay rejected the message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The relay could not be reached
    #[error("Mail relay unreachable: {0}")]
    Transport(String),

    #[error("Failed to encode relay payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
