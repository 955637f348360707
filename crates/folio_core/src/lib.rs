//! Folio Core Runtime
//!
//! Foundational primitives shared by every folio crate:
//!
//! - **Document Host**: platform abstraction over scroll position, viewport
//!   metrics and element geometry, with an in-memory implementation
//! - **Scroll Observer**: the single scroll/resize listener, fanning one
//!   snapshot per frame out to all subscribers
//! - **Preference Store**: `localStorage`-style persisted key-value pairs

pub mod document;
pub mod error;
pub mod scroll;
pub mod store;

pub use document::{
    share, Bounds, DocumentHost, ElementId, ElementStyle, HeadlessDocument, SharedHost,
    StyleTarget,
};
pub use error::{CoreError, Result};
pub use scroll::{
    scroll_progress, ScrollObserver, ScrollSnapshot, ScrollState, SectionBounds,
    SectionDescriptor, SubscriberId, Subscription, DEFAULT_RESIZE_DEBOUNCE_MS, SCROLL_EPSILON,
};
pub use store::PreferenceStore;
