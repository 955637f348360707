//! Widget error types

use folio_animation::AnimationError;
use folio_core::CoreError;
use thiserror::Error;

/// Errors raised while composing and mounting page components
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Two sections in a page layout share an id
    #[error("Duplicate section id: {0}")]
    DuplicateSection(String),

    /// A page layout with no sections
    #[error("Page layout has no sections")]
    EmptyLayout,
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
