//! Folio Animation System
//!
//! Timelines, springs and the scroll-triggered reveal sequencer.
//!
//! # Features
//!
//! - **Presets**: closed set of section entrance effects (`fade-rise`,
//!   `slide-from-left`, `scale-in`, `char-reveal`, `progress-scrub`)
//! - **Timelines**: staggered style tweens that retrace exactly on reverse
//! - **Sequencer**: per-intent lifecycle (Idle, Armed, Playing, Settled,
//!   Reversing, Cancelled) driven by scroll snapshots
//! - **Springs**: RK4 springs for the navigation indicator
//! - **Scroll-to**: eased, interruptible scroll tweens
//! - **Engine handle**: weak capability handed to components; no globals

pub mod easing;
pub mod engine;
pub mod error;
pub mod glyph;
pub mod presets;
pub mod sequencer;
pub mod spring;
pub mod timeline;
pub mod values;

pub use easing::Easing;
pub use engine::{
    AnimationEngine, EngineHandle, IntentKey, ScrollOutcome, ScrollTrigger, ScrollTweenId,
    SpringId, TimelineId,
};
pub use error::{AnimationError, Result};
pub use glyph::{split_glyphs, GlyphUnit};
pub use presets::{Preset, ScrubRange, SectionVariant};
pub use sequencer::{HandlePhase, HandleStats, RevealIntent, RevealMode, ViewportFraction};
pub use spring::{Spring, SpringConfig};
pub use timeline::{PlayDirection, StaggerBuilder, Timeline, TimelineEntry, TimelineEntryId};
pub use values::Interpolate;
