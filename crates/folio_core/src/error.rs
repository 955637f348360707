//! Core error types

use thiserror::Error;

/// Errors raised by the document host, scroll observer and preference store
#[derive(Error, Debug)]
pub enum CoreError {
    /// A section id has no corresponding element in the document
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// An element handle no longer refers to a live element
    #[error("Element is not attached to the document")]
    ElementDetached,

    /// Reading or writing the preference file failed
    #[error("Preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The preference file exists but is not a valid key-value map
    #[error("Preference store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
