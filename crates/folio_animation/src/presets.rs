//! Section reveal presets
//!
//! The closed set of entrance effects a section can use, and the section
//! styling variants that pick the motion curve flavour.

use crate::easing::Easing;
use crate::error::AnimationError;
use folio_core::document::ElementStyle;
use std::fmt;
use std::str::FromStr;

/// Per-glyph run of the character reveal
pub const GLYPH_DURATION_MS: f32 = 600.0;
pub const GLYPH_STAGGER_MS: f32 = 30.0;
pub const GLYPH_RISE_PX: f32 = 80.0;
pub const GLYPH_FLIP_DEG: f32 = 90.0;

/// Follow-up targets of the character reveal
pub const FOLLOW_DURATION_MS: f32 = 500.0;
/// How far the follow-up run starts before the glyph run ends
pub const FOLLOW_OVERLAP_MS: f32 = 300.0;

/// Default stagger between targets, in seconds
pub const DEFAULT_STAGGER_SECONDS: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    #[default]
    FadeRise,
    SlideFromLeft,
    ScaleIn,
    CharReveal,
    ProgressScrub,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::FadeRise,
        Preset::SlideFromLeft,
        Preset::ScaleIn,
        Preset::CharReveal,
        Preset::ProgressScrub,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::FadeRise => "fade-rise",
            Preset::SlideFromLeft => "slide-from-left",
            Preset::ScaleIn => "scale-in",
            Preset::CharReveal => "char-reveal",
            Preset::ProgressScrub => "progress-scrub",
        }
    }

    /// Scroll position drives the value directly; no timed playback
    pub fn is_scrubbed(&self) -> bool {
        matches!(self, Preset::ProgressScrub)
    }

    /// Style applied to every target before the reveal
    pub fn initial_style(&self) -> ElementStyle {
        let hidden = ElementStyle::IDENTITY.with_opacity(0.0);
        match self {
            Preset::FadeRise | Preset::CharReveal => hidden.with_translate(0.0, 60.0),
            Preset::SlideFromLeft => hidden.with_translate(-80.0, 0.0),
            Preset::ScaleIn => hidden.with_scale(0.8),
            Preset::ProgressScrub => ElementStyle::IDENTITY.with_scale(0.0),
        }
    }

    /// Style every target ends in
    pub fn final_style(&self) -> ElementStyle {
        ElementStyle::IDENTITY
    }

    /// Initial style of one headline glyph (character reveal only)
    pub fn glyph_initial_style() -> ElementStyle {
        ElementStyle::IDENTITY
            .with_opacity(0.0)
            .with_translate(0.0, GLYPH_RISE_PX)
            .with_rotate_x(GLYPH_FLIP_DEG)
    }

    /// Tween length per target
    pub fn duration_ms(&self) -> f32 {
        match self {
            Preset::CharReveal => FOLLOW_DURATION_MS,
            _ => 600.0,
        }
    }

    /// Native curve of the preset
    pub fn easing(&self) -> Easing {
        match self {
            Preset::ScaleIn => Easing::BackOut(1.4),
            Preset::ProgressScrub => Easing::Linear,
            _ => Easing::CubicOut,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s.trim())
            .ok_or_else(|| AnimationError::UnknownPreset(s.to_string()))
    }
}

/// Section styling variant
///
/// Sections share one reveal component; the variant only changes the
/// character of the motion curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SectionVariant {
    /// Hand-drawn look: bouncy overshoot curves
    Doodle,
    /// Preset curves unchanged
    #[default]
    Minimal,
    /// Slow symmetric curves, no overshoot
    DarkGradient,
}

impl SectionVariant {
    pub fn name(&self) -> &'static str {
        match self {
            SectionVariant::Doodle => "doodle",
            SectionVariant::Minimal => "minimal",
            SectionVariant::DarkGradient => "dark-gradient",
        }
    }

    /// Curve to use in place of a preset's native curve
    pub fn flavour(&self, native: Easing) -> Easing {
        match self {
            SectionVariant::Minimal => native,
            SectionVariant::Doodle => match native {
                Easing::Linear => Easing::Linear,
                Easing::BackOut(_) => Easing::ElasticOut {
                    amplitude: 1.0,
                    period: 0.5,
                },
                _ => Easing::BACK_OUT,
            },
            SectionVariant::DarkGradient => match native {
                Easing::Linear => Easing::Linear,
                _ => Easing::CubicInOut,
            },
        }
    }
}

impl fmt::Display for SectionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionVariant {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "doodle" => Ok(SectionVariant::Doodle),
            "minimal" => Ok(SectionVariant::Minimal),
            "dark-gradient" => Ok(SectionVariant::DarkGradient),
            other => Err(AnimationError::UnknownVariant(other.to_string())),
        }
    }
}

/// Scroll range a scrubbed reveal maps onto `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrubRange {
    /// From the trigger entering at the bottom to leaving at the top
    #[default]
    Traversal,
    /// From the trigger's top reaching the viewport top until its bottom
    /// reaches the viewport bottom
    Contained,
}

impl ScrubRange {
    /// Fraction of the range covered at `scroll_y`
    ///
    /// A zero-length range counts as complete once its start is reached.
    pub fn fraction(&self, top: f32, height: f32, scroll_y: f32, viewport_height: f32) -> f32 {
        let (start, end) = match self {
            ScrubRange::Traversal => (top - viewport_height, top + height),
            ScrubRange::Contained => (top, top + height - viewport_height),
        };
        if end <= start {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }
}
