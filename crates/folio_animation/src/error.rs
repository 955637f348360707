//! Animation error types

use thiserror::Error;

/// Errors raised while resolving animation configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Preset name not in the closed preset set
    #[error("Unknown animation preset: {0}")]
    UnknownPreset(String),

    /// Easing name could not be parsed
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Section variant name not recognized
    #[error("Unknown section variant: {0}")]
    UnknownVariant(String),

    /// The engine backing a handle has been dropped
    #[error("Animation engine is no longer alive")]
    EngineDropped,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
