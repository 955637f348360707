//! Page composition root
//!
//! [`Page`] builds the whole runtime for one page: it lays the sections out
//! in a [`HeadlessDocument`], creates the single [`ScrollObserver`] and
//! [`AnimationEngine`], and mounts every component against them. Components
//! only ever see the observer and an [`EngineHandle`]; nothing is global.
//!
//! Each call to [`Page::frame`] runs one frame:
//!
//! ```text
//! engine tick (scroll tween, timelines, springs)
//!   -> observer poll (one snapshot to every subscriber)
//!   -> progress glow
//!   -> style flush
//! ```
//!
//! [`EngineHandle`]: folio_animation::EngineHandle

use crate::error::{Result, WidgetError};
use crate::indicator::{is_nav_scrolled, link_id, NavigationIndicator, NavigationIndicatorState};
use crate::navigation::{Navigation, SmoothNavigator, DEFAULT_NAV_OFFSET_PX};
use crate::progress::{ScrollProgressIndicator, PROGRESS_BAR_ID, PROGRESS_FILL_ID};
use crate::reveal::{SectionReveal, SectionRevealConfig};
use crate::tracker::{ActiveSectionTracker, DEFAULT_ACTIVATION_OFFSET};
use folio_animation::{AnimationEngine, HandlePhase, Preset, SectionVariant};
use folio_content::registry::{
    self, ABOUT_FEATURES, CONTACT_CHANNELS, EDUCATION, PERSONAL_INFO, PROJECTS, SITE_CONFIG,
    SKILL_GROUPS,
};
use folio_core::document::{
    share, Bounds, DocumentHost, ElementId, ElementStyle, HeadlessDocument, SharedHost, StyleTarget,
};
use folio_core::scroll::{ScrollObserver, DEFAULT_RESIZE_DEBOUNCE_MS};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 900.0;
pub const DEFAULT_SECTION_HEIGHT: f32 = 1000.0;

const CONTENT_X: f32 = 160.0;
const CONTENT_WIDTH: f32 = 960.0;
const HEADLINE_TOP: f32 = 80.0;
const HEADLINE_HEIGHT: f32 = 72.0;
const ITEMS_TOP: f32 = 200.0;
const ITEM_GAP: f32 = 20.0;
const NAV_START_X: f32 = 400.0;
const NAV_SPACING: f32 = 110.0;

/// DOM id of a section's headline
pub fn title_id(section_id: &str) -> String {
    format!("{}-title", section_id)
}

/// DOM id of the `n`th content block of a section
pub fn item_id(section_id: &str, n: u32) -> String {
    format!("{}-item-{}", section_id, n)
}

/// One section of the page layout
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SectionLayout {
    pub id: String,
    #[serde(default = "default_section_height")]
    pub height: f32,
    /// Headline text; the first reveal target when present
    #[serde(default)]
    pub headline: Option<String>,
    /// Number of content blocks below the headline
    #[serde(default)]
    pub items: u32,
    /// Whether the section gets a reveal component
    #[serde(default = "default_true")]
    pub animated: bool,
    #[serde(default)]
    pub reveal: SectionRevealConfig,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, height: f32) -> Self {
        Self {
            id: id.into(),
            height,
            headline: None,
            items: 0,
            animated: true,
            reveal: SectionRevealConfig::default(),
        }
    }

    pub fn headline(mut self, text: impl Into<String>) -> Self {
        self.headline = Some(text.into());
        self
    }

    pub fn items(mut self, items: u32) -> Self {
        self.items = items;
        self
    }

    pub fn reveal(mut self, reveal: SectionRevealConfig) -> Self {
        self.reveal = reveal;
        self
    }

    pub fn static_section(mut self) -> Self {
        self.animated = false;
        self
    }
}

fn default_section_height() -> f32 {
    DEFAULT_SECTION_HEIGHT
}

fn default_true() -> bool {
    true
}

fn default_viewport_width() -> f32 {
    DEFAULT_VIEWPORT_WIDTH
}

fn default_viewport_height() -> f32 {
    DEFAULT_VIEWPORT_HEIGHT
}

fn default_activation_offset() -> f32 {
    DEFAULT_ACTIVATION_OFFSET
}

fn default_nav_offset() -> f32 {
    DEFAULT_NAV_OFFSET_PX
}

fn default_resize_debounce() -> f64 {
    DEFAULT_RESIZE_DEBOUNCE_MS
}

fn default_progress_bar() -> bool {
    SITE_CONFIG.features.scroll_progress
}

/// The portfolio's own sections, built from the content registry
pub fn default_sections() -> Vec<SectionLayout> {
    let animation = SITE_CONFIG.animation;
    let reveal = |preset: Preset, variant: SectionVariant| SectionRevealConfig {
        stagger: animation.stagger_seconds,
        threshold: animation.trigger_start,
        ..SectionRevealConfig::with_preset(preset).variant(variant)
    };
    let sized = |id: &str, items: usize| SectionLayout::new(id, 400.0 + items as f32 * 200.0).items(items as u32);

    registry::NAV_ITEMS
        .iter()
        .map(|item| match item.id {
            "home" => SectionLayout::new(item.id, DEFAULT_VIEWPORT_HEIGHT)
                .headline(PERSONAL_INFO.name)
                .items(3)
                .reveal(reveal(Preset::CharReveal, SectionVariant::Doodle)),
            "about" => sized(item.id, ABOUT_FEATURES.len())
                .headline(PERSONAL_INFO.about_title)
                .reveal(reveal(Preset::FadeRise, SectionVariant::Doodle)),
            "skills" => sized(item.id, SKILL_GROUPS.len())
                .headline(item.label)
                .reveal(reveal(Preset::ScaleIn, SectionVariant::Minimal)),
            "education" => sized(item.id, EDUCATION.len())
                .headline(item.label)
                .reveal(reveal(Preset::SlideFromLeft, SectionVariant::Minimal)),
            "projects" => sized(item.id, PROJECTS.len())
                .headline(item.label)
                .reveal(reveal(Preset::FadeRise, SectionVariant::DarkGradient)),
            "contact" => sized(item.id, CONTACT_CHANNELS.len())
                .headline("Get In Touch")
                .reveal(reveal(Preset::CharReveal, SectionVariant::Doodle)),
            other => SectionLayout::new(other, DEFAULT_SECTION_HEIGHT).headline(item.label),
        })
        .collect()
}

/// Page geometry and component settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Probe distance below the viewport top for the active section
    #[serde(default = "default_activation_offset")]
    pub activation_offset: f32,
    /// Space kept above a section when navigating to it
    #[serde(default = "default_nav_offset")]
    pub nav_offset: f32,
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: f64,
    #[serde(default = "default_progress_bar")]
    pub progress_bar: bool,
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionLayout>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            activation_offset: default_activation_offset(),
            nav_offset: default_nav_offset(),
            resize_debounce_ms: default_resize_debounce(),
            progress_bar: default_progress_bar(),
            sections: default_sections(),
        }
    }
}

impl PageConfig {
    /// Same settings, different sections
    pub fn with_sections(sections: Vec<SectionLayout>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(WidgetError::EmptyLayout);
        }
        let mut seen = IndexSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(WidgetError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(())
    }
}

type Targets = SmallVec<[ElementId; 8]>;

fn layout(config: &PageConfig) -> (HeadlessDocument, IndexMap<String, Targets>) {
    let mut doc = HeadlessDocument::new(config.viewport_width, config.viewport_height);
    let mut targets = IndexMap::new();

    let mut top = 0.0;
    for (index, section) in config.sections.iter().enumerate() {
        doc.insert_section(&section.id, top, section.height);

        let mut elements = Targets::new();
        if let Some(headline) = &section.headline {
            elements.push(doc.insert_text(
                Some(&title_id(&section.id)),
                Bounds::new(CONTENT_X, top + HEADLINE_TOP, CONTENT_WIDTH, HEADLINE_HEIGHT),
                headline,
            ));
        }
        if section.items > 0 {
            let row = ((section.height - ITEMS_TOP - 2.0 * ITEM_GAP) / section.items as f32)
                .max(2.0 * ITEM_GAP);
            for n in 0..section.items {
                elements.push(doc.insert_element(
                    Some(&item_id(&section.id, n)),
                    Bounds::new(
                        CONTENT_X,
                        top + ITEMS_TOP + n as f32 * row,
                        CONTENT_WIDTH,
                        row - ITEM_GAP,
                    ),
                ));
            }
        }
        targets.insert(section.id.clone(), elements);

        let label = registry::nav_item(&section.id)
            .map(|item| item.label)
            .unwrap_or(section.id.as_str());
        doc.insert_element(
            Some(&link_id(&section.id)),
            Bounds::new(
                NAV_START_X + index as f32 * NAV_SPACING,
                20.0,
                16.0 + label.chars().count() as f32 * 8.0,
                24.0,
            ),
        );

        top += section.height;
    }

    if config.progress_bar {
        let bar = Bounds::new(0.0, 0.0, config.viewport_width, 4.0);
        doc.insert_element(Some(PROGRESS_BAR_ID), bar);
        doc.insert_element(Some(PROGRESS_FILL_ID), bar);
    }

    (doc, targets)
}

/// A fully mounted page
pub struct Page {
    // Components first so they release engine and observer state on drop
    reveals: IndexMap<String, SectionReveal>,
    progress: Option<ScrollProgressIndicator>,
    indicator: NavigationIndicator,
    navigator: SmoothNavigator,
    tracker: ActiveSectionTracker,
    engine: AnimationEngine,
    observer: ScrollObserver,
    document: Rc<RefCell<HeadlessDocument>>,
    config: PageConfig,
    now_ms: f64,
}

impl Page {
    /// Lay out the document and mount every component
    pub fn build(config: PageConfig) -> Result<Self> {
        config.validate()?;
        let (doc, mut targets) = layout(&config);

        let document = share(doc);
        let host: SharedHost = document.clone();
        let observer = ScrollObserver::new(
            host.clone(),
            config.sections.iter().map(|section| section.id.clone()),
        );
        observer.set_resize_debounce(config.resize_debounce_ms);
        observer.mount();

        let engine = AnimationEngine::new(host.clone());
        let handle = engine.handle();

        // Reveals subscribe in document order
        let mut reveals = IndexMap::new();
        for section in config.sections.iter().filter(|section| section.animated) {
            let elements = targets.shift_remove(&section.id).unwrap_or_default();
            let reveal = SectionReveal::mount(&handle, &observer, &section.id, elements, &section.reveal)?;
            reveals.insert(section.id.clone(), reveal);
        }

        let tracker = ActiveSectionTracker::with_offset(&observer, config.activation_offset);
        let indicator = NavigationIndicator::new(handle.clone(), host, &tracker);
        let progress = config
            .progress_bar
            .then(|| ScrollProgressIndicator::new(&observer, handle.clone()));
        let navigator = SmoothNavigator::new(handle, observer.clone());

        tracing::debug!(
            "Page: mounted {} sections ({} animated), document {}px",
            config.sections.len(),
            reveals.len(),
            document.borrow().document_height()
        );

        let page = Self {
            reveals,
            progress,
            indicator,
            navigator,
            tracker,
            engine,
            observer,
            document,
            config,
            now_ms: 0.0,
        };
        // Styles from reveals that fired at mount
        page.engine.flush_styles();
        Ok(page)
    }

    /// Run one frame of `dt_ms`
    pub fn frame(&mut self, dt_ms: f32) {
        self.now_ms += dt_ms as f64;
        self.engine.tick(dt_ms);
        self.observer.poll(self.now_ms);
        if let Some(progress) = &self.progress {
            progress.tick(self.now_ms);
        }
        self.engine.flush_styles();
    }

    /// Run frames of `step_ms` until `duration_ms` has passed
    pub fn run_for(&mut self, duration_ms: f32, step_ms: f32) {
        let step = step_ms.max(1.0);
        let mut elapsed = 0.0;
        while elapsed < duration_ms {
            self.frame(step);
            elapsed += step;
        }
    }

    /// Run frames until `navigation` resolves or `limit_ms` passes
    pub fn run_until_finished(&mut self, navigation: &Navigation, step_ms: f32, limit_ms: f32) -> bool {
        let step = step_ms.max(1.0);
        let mut elapsed = 0.0;
        while !navigation.is_finished() && elapsed < limit_ms {
            self.frame(step);
            elapsed += step;
        }
        navigation.is_finished()
    }

    /// Scroll as the user would; picked up on the next frame
    pub fn user_scroll(&mut self, scroll_y: f32) {
        self.document.borrow_mut().set_scroll_y(scroll_y);
    }

    /// Resize the viewport; section bounds refresh after the debounce
    pub fn resize(&mut self, width: f32, height: f32) {
        self.document.borrow_mut().set_viewport(width, height);
        self.observer.notify_resize(self.now_ms);
    }

    /// Smooth-scroll to a section, leaving room for the navigation bar
    pub fn navigate(&self, section_id: &str) -> Navigation {
        self.navigator.navigate_to(section_id, self.config.nav_offset)
    }

    pub fn navigate_to_fragment(&self, fragment: &str) -> Navigation {
        self.navigator
            .navigate_to_fragment(fragment, self.config.nav_offset)
    }

    /// Unmount one section's reveal; returns whether it was mounted
    pub fn unmount_section(&mut self, section_id: &str) -> bool {
        match self.reveals.shift_remove(section_id) {
            Some(reveal) => {
                reveal.unmount();
                true
            }
            None => false,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn scroll_y(&self) -> f32 {
        self.document.borrow().scroll_y()
    }

    pub fn active_section(&self) -> String {
        self.tracker.active_section()
    }

    pub fn indicator_state(&self) -> NavigationIndicatorState {
        self.indicator.state()
    }

    /// Read fraction of the page, `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        match &self.progress {
            Some(progress) => progress.progress(),
            None => self
                .observer
                .current()
                .map(|state| state.progress)
                .unwrap_or(0.0),
        }
    }

    pub fn progress_bar(&self) -> Option<&ScrollProgressIndicator> {
        self.progress.as_ref()
    }

    /// Whether the navigation bar shows its scrolled look
    pub fn is_nav_scrolled(&self) -> bool {
        is_nav_scrolled(self.scroll_y())
    }

    pub fn toggle_menu(&self) -> bool {
        self.navigator.toggle_menu()
    }

    pub fn is_menu_open(&self) -> bool {
        self.navigator.is_menu_open()
    }

    pub fn reveal(&self, section_id: &str) -> Option<&SectionReveal> {
        self.reveals.get(section_id)
    }

    /// Mounted reveals, in document order
    pub fn reveals(&self) -> impl Iterator<Item = &SectionReveal> {
        self.reveals.values()
    }

    pub fn phase(&self, section_id: &str) -> Option<HandlePhase> {
        self.reveals.get(section_id).and_then(SectionReveal::phase)
    }

    /// Element with the given DOM id
    pub fn element(&self, dom_id: &str) -> Option<ElementId> {
        self.document.borrow().element_by_id(dom_id)
    }

    /// Last style written to the element with the given DOM id
    pub fn style_of(&self, dom_id: &str) -> Option<ElementStyle> {
        let document = self.document.borrow();
        let element = document.element_by_id(dom_id)?;
        document.style(StyleTarget::element(element))
    }

    pub fn document(&self) -> Rc<RefCell<HeadlessDocument>> {
        self.document.clone()
    }

    pub fn observer(&self) -> &ScrollObserver {
        &self.observer
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &ActiveSectionTracker {
        &self.tracker
    }

    pub fn navigator(&self) -> &SmoothNavigator {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_follows_navigation() {
        let config = PageConfig::default();
        let ids: Vec<_> = config.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["home", "about", "skills", "education", "projects", "contact"]);
        assert_eq!(config.sections[0].reveal.preset, "char-reveal");
        assert_eq!(config.sections[1].items, 4);
        assert_eq!(config.sections[0].reveal.threshold, 0.2);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Page::build(PageConfig::with_sections(Vec::new())),
            Err(WidgetError::EmptyLayout)
        ));
        let duplicate = PageConfig::with_sections(vec![
            SectionLayout::new("home", 900.0),
            SectionLayout::new("home", 900.0),
        ]);
        assert!(matches!(
            Page::build(duplicate),
            Err(WidgetError::DuplicateSection(ref id)) if id == "home"
        ));
    }

    #[test]
    fn test_build_mounts_everything() {
        let page = Page::build(PageConfig::default()).unwrap();
        assert_eq!(page.reveals().count(), 6);
        assert_eq!(page.active_section(), "home");
        assert!(page.element("nav-contact").is_some());
        assert!(page.element(&title_id("about")).is_some());
        assert!(page.progress_bar().is_some());
        // Reveals, tracker and progress bar each hold one subscription
        assert_eq!(page.observer().subscriber_count(), 8);
    }

    #[test]
    fn test_hero_plays_on_load() {
        let mut page = Page::build(PageConfig::default()).unwrap();
        assert_eq!(page.phase("home"), Some(HandlePhase::Playing));
        assert_eq!(page.phase("contact"), Some(HandlePhase::Armed));

        page.run_for(3000.0, 16.0);
        assert_eq!(page.phase("home"), Some(HandlePhase::Settled));
        assert_eq!(page.style_of(&item_id("home", 2)).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_nav_scrolled_flag() {
        let mut page = Page::build(PageConfig::default()).unwrap();
        assert!(!page.is_nav_scrolled());
        page.user_scroll(200.0);
        page.frame(16.0);
        assert!(page.is_nav_scrolled());
    }

    #[test]
    fn test_config_from_toml() {
        let config: PageConfig = toml::from_str(
            r#"
            viewport_height = 1000
            progress_bar = false

            [[sections]]
            id = "home"
            height = 1000
            headline = "Hello"

            [[sections]]
            id = "work"
            items = 3
            reveal = { preset = "scale-in", variant = "dark-gradient", repeatable = false }
            "#,
        )
        .unwrap();

        assert_eq!(config.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(config.sections[1].height, DEFAULT_SECTION_HEIGHT);
        assert!(!config.sections[1].reveal.repeatable);

        let page = Page::build(config).unwrap();
        assert!(page.progress_bar().is_none());
        assert_eq!(page.document().borrow().document_height(), 2000.0);
    }

    #[test]
    fn test_unmount_section_releases_subscription() {
        let mut page = Page::build(PageConfig::default()).unwrap();
        let before = page.observer().subscriber_count();
        assert!(page.unmount_section("skills"));
        assert!(!page.unmount_section("skills"));
        assert_eq!(page.observer().subscriber_count(), before - 1);
    }
}
