//! Section reveal component
//!
//! One component covers every animated section. It is configured by a
//! preset name and a [`SectionVariant`]; mounting it builds the section's
//! [`RevealIntent`] and binds it to the scroll observer through the engine.
//! Dropping it unmounts: the animation handle is cancelled and the observer
//! subscription removed before the drop returns.

use crate::error::{Result, WidgetError};
use folio_animation::{
    EngineHandle, HandlePhase, HandleStats, IntentKey, Preset, RevealIntent, ScrollTrigger,
    ScrubRange, SectionVariant, ViewportFraction,
};
use folio_core::document::ElementId;
use folio_core::scroll::ScrollObserver;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Serializable reveal settings for one section
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SectionRevealConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Seconds between consecutive targets
    #[serde(default = "default_stagger")]
    pub stagger: f32,
    #[serde(default)]
    pub delay: f32,
    /// Fraction of the viewport height, measured up from the bottom
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_repeatable")]
    pub repeatable: bool,
    #[serde(default)]
    pub continuous: bool,
    #[serde(default = "default_variant")]
    pub variant: String,
    /// `traversal` or `contained`; only used by scrubbed presets
    #[serde(default)]
    pub scrub_range: ScrubRangeConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrubRangeConfig {
    #[default]
    Traversal,
    Contained,
}

impl From<ScrubRangeConfig> for ScrubRange {
    fn from(range: ScrubRangeConfig) -> Self {
        match range {
            ScrubRangeConfig::Traversal => ScrubRange::Traversal,
            ScrubRangeConfig::Contained => ScrubRange::Contained,
        }
    }
}

fn default_preset() -> String {
    Preset::default().name().to_string()
}

fn default_stagger() -> f32 {
    folio_animation::presets::DEFAULT_STAGGER_SECONDS
}

fn default_threshold() -> f32 {
    ViewportFraction::DEFAULT.value()
}

fn default_repeatable() -> bool {
    true
}

fn default_variant() -> String {
    SectionVariant::default().name().to_string()
}

impl Default for SectionRevealConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            stagger: default_stagger(),
            delay: 0.0,
            threshold: default_threshold(),
            repeatable: default_repeatable(),
            continuous: false,
            variant: default_variant(),
            scrub_range: ScrubRangeConfig::default(),
        }
    }
}

impl SectionRevealConfig {
    pub fn with_preset(preset: Preset) -> Self {
        Self {
            preset: preset.name().to_string(),
            ..Self::default()
        }
    }

    pub fn variant(mut self, variant: SectionVariant) -> Self {
        self.variant = variant.name().to_string();
        self
    }

    /// Build the intent; unknown preset or variant names are rejected here
    pub fn to_intent(
        &self,
        trigger: ElementId,
        targets: impl IntoIterator<Item = ElementId>,
    ) -> Result<RevealIntent> {
        let preset: Preset = self.preset.parse()?;
        let variant: SectionVariant = self.variant.parse()?;
        let mut intent = RevealIntent::new(trigger, preset)
            .targets(targets)
            .stagger(self.stagger)
            .delay(self.delay)
            .threshold(ViewportFraction::new(self.threshold))
            .repeatable(self.repeatable)
            .variant(variant)
            .scrub_range(self.scrub_range.into());
        if self.continuous {
            intent = intent.continuous();
        }
        Ok(intent)
    }
}

/// A mounted, animated section
pub struct SectionReveal {
    section_id: String,
    intent: Rc<RevealIntent>,
    trigger: ScrollTrigger,
}

impl SectionReveal {
    /// Resolve the section element, build the intent and bind it
    ///
    /// `targets` are the elements animated in order; for `char-reveal` the
    /// first one is the headline that gets split into glyphs.
    pub fn mount(
        engine: &EngineHandle,
        observer: &ScrollObserver,
        section_id: &str,
        targets: impl IntoIterator<Item = ElementId>,
        config: &SectionRevealConfig,
    ) -> Result<Self> {
        let trigger_element = observer
            .host()
            .borrow()
            .element_by_id(section_id)
            .ok_or_else(|| {
                WidgetError::Core(folio_core::CoreError::SectionNotFound(section_id.to_string()))
            })?;

        let intent = Rc::new(config.to_intent(trigger_element, targets)?);
        let trigger = engine.bind_scroll_trigger(observer, &intent)?;
        tracing::debug!(
            "SectionReveal: mounted '{}' ({}, {} targets)",
            section_id,
            intent.preset,
            intent.targets.len()
        );

        Ok(Self {
            section_id: section_id.to_string(),
            intent,
            trigger,
        })
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn intent(&self) -> &RevealIntent {
        &self.intent
    }

    pub fn key(&self) -> IntentKey {
        self.trigger.key()
    }

    /// Current lifecycle phase; `None` once the handle has been pruned
    pub fn phase(&self) -> Option<HandlePhase> {
        self.trigger.phase()
    }

    pub fn stats(&self) -> Option<HandleStats> {
        self.trigger.stats()
    }

    /// Unmount explicitly; same as dropping
    pub fn unmount(self) {
        tracing::debug!("SectionReveal: unmounting '{}'", self.section_id);
    }
}

impl std::fmt::Debug for SectionReveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionReveal")
            .field("section_id", &self.section_id)
            .field("preset", &self.intent.preset)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{AnimationEngine, AnimationError};
    use folio_core::document::{share, Bounds, DocumentHost, HeadlessDocument, StyleTarget};
    use std::cell::RefCell;

    struct Fixture {
        host: Rc<RefCell<HeadlessDocument>>,
        observer: ScrollObserver,
        engine: AnimationEngine,
        cards: Vec<ElementId>,
    }

    fn fixture() -> Fixture {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        doc.insert_section("home", 0.0, 1000.0);
        doc.insert_section("about", 1000.0, 1000.0);
        doc.insert_section("skills", 2000.0, 1000.0);
        let cards = (0..3)
            .map(|i| doc.insert_element(None, Bounds::new(100.0, 1100.0 + i as f32 * 200.0, 300.0, 150.0)))
            .collect();
        let host = share(doc);
        let observer = ScrollObserver::new(host.clone(), ["home", "about", "skills"]);
        observer.mount();
        let engine = AnimationEngine::new(host.clone());
        Fixture {
            host,
            observer,
            engine,
            cards,
        }
    }

    #[test]
    fn test_config_defaults() {
        let config: SectionRevealConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SectionRevealConfig::default());
        assert_eq!(config.preset, "fade-rise");
        assert_eq!(config.variant, "minimal");
        assert!(config.repeatable);
        assert_eq!(config.threshold, 0.25);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let fx = fixture();
        let config = SectionRevealConfig {
            preset: "wiggle".into(),
            ..SectionRevealConfig::default()
        };
        let err = SectionReveal::mount(&fx.engine.handle(), &fx.observer, "about", fx.cards.clone(), &config)
            .unwrap_err();
        assert!(matches!(
            err,
            WidgetError::Animation(AnimationError::UnknownPreset(ref name)) if name == "wiggle"
        ));
        assert_eq!(fx.observer.subscriber_count(), 0);
    }

    #[test]
    fn test_missing_section_rejected() {
        let fx = fixture();
        let result = SectionReveal::mount(
            &fx.engine.handle(),
            &fx.observer,
            "blog",
            fx.cards.clone(),
            &SectionRevealConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mount_applies_initial_style_and_unmount_restores_subscribers() {
        let fx = fixture();
        let before = fx.observer.subscriber_count();
        let reveal = SectionReveal::mount(
            &fx.engine.handle(),
            &fx.observer,
            "about",
            fx.cards.clone(),
            &SectionRevealConfig::with_preset(Preset::SlideFromLeft),
        )
        .unwrap();

        assert_eq!(fx.observer.subscriber_count(), before + 1);
        assert_eq!(reveal.phase(), Some(HandlePhase::Armed));
        let style = fx.host.borrow().style(StyleTarget::element(fx.cards[0])).unwrap();
        assert_eq!(style.translate_x, -80.0);
        assert_eq!(style.opacity, 0.0);

        reveal.unmount();
        assert_eq!(fx.observer.subscriber_count(), before);
        assert_eq!(fx.engine.intent_count(), 0);
    }

    #[test]
    fn test_reveal_plays_when_scrolled_into_view() {
        let fx = fixture();
        let reveal = SectionReveal::mount(
            &fx.engine.handle(),
            &fx.observer,
            "about",
            fx.cards.clone(),
            &SectionRevealConfig::default(),
        )
        .unwrap();

        // Top 1000 - 300 = 700 <= 750
        fx.host.borrow_mut().set_scroll_y(300.0);
        fx.observer.poll(16.0);
        assert_eq!(reveal.phase(), Some(HandlePhase::Playing));

        for _ in 0..80 {
            fx.engine.tick(16.0);
            fx.engine.flush_styles();
        }
        assert_eq!(reveal.phase(), Some(HandlePhase::Settled));
        let style = fx.host.borrow().style(StyleTarget::element(fx.cards[2])).unwrap();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.translate_y, 0.0);
    }
}
