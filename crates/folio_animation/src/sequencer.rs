//! Scroll-triggered reveal sequencing
//!
//! Every mounted section registers a [`RevealIntent`]. The sequencer turns it
//! into an animation handle and moves that handle through its lifecycle as
//! scroll snapshots arrive:
//!
//! ```text
//! Idle -> Armed -> Playing -> Settled
//!           ^         |  ^       |
//!           |         v  |       v        (repeatable only)
//!           +----- Reversing <---+
//!
//! any state -> Cancelled
//! ```
//!
//! A handle fires when the trigger's top edge crosses a line a fraction of
//! the viewport height above the viewport bottom. Intents sharing a trigger
//! that fire in the same dispatch chain their staggers: the second intent's
//! first target starts where the first intent's run ended.
//!
//! The sequencer only holds a `Weak` reference to each intent; the section
//! component owns it.

use crate::easing::Easing;
use crate::engine::{IntentKey, TimelineId};
use crate::glyph::split_glyphs;
use crate::presets::{
    Preset, ScrubRange, SectionVariant, DEFAULT_STAGGER_SECONDS, FOLLOW_OVERLAP_MS,
    GLYPH_DURATION_MS, GLYPH_STAGGER_MS,
};
use crate::timeline::Timeline;
use folio_core::document::{DocumentHost, ElementId, ElementStyle, StyleTarget};
use folio_core::scroll::ScrollSnapshot;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::rc::{Rc, Weak};

/// Span a scrubbed timeline is built over; only its fraction matters
const SCRUB_SPAN_MS: f32 = 1000.0;

/// Position of the trigger line, measured up from the viewport bottom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFraction(f32);

impl ViewportFraction {
    /// Trigger when the top edge reaches 75% of the viewport height
    pub const DEFAULT: ViewportFraction = ViewportFraction(0.25);

    /// Clamped to `[0, 1]`
    pub fn new(fraction: f32) -> Self {
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Distance of the trigger line from the viewport top
    pub fn trigger_line(&self, viewport_height: f32) -> f32 {
        viewport_height * (1.0 - self.0)
    }
}

impl Default for ViewportFraction {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What happens after the reveal has played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealMode {
    /// Play once to the final state
    #[default]
    Entrance,
    /// Bounce between initial and final state until cancelled
    Continuous,
}

/// Declarative description of a section's entrance animation
#[derive(Clone, Debug)]
pub struct RevealIntent {
    pub trigger: ElementId,
    pub targets: SmallVec<[ElementId; 8]>,
    pub preset: Preset,
    pub stagger_seconds: f32,
    pub delay_seconds: f32,
    pub trigger_threshold: ViewportFraction,
    /// Reverse when scrolled back above the trigger line
    pub repeatable: bool,
    pub mode: RevealMode,
    pub variant: SectionVariant,
    pub scrub_range: ScrubRange,
}

impl RevealIntent {
    pub fn new(trigger: ElementId, preset: Preset) -> Self {
        Self {
            trigger,
            targets: SmallVec::new(),
            preset,
            stagger_seconds: DEFAULT_STAGGER_SECONDS,
            delay_seconds: 0.0,
            trigger_threshold: ViewportFraction::DEFAULT,
            repeatable: true,
            mode: RevealMode::Entrance,
            variant: SectionVariant::default(),
            scrub_range: ScrubRange::default(),
        }
    }

    pub fn targets(mut self, targets: impl IntoIterator<Item = ElementId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn stagger(mut self, seconds: f32) -> Self {
        self.stagger_seconds = seconds.max(0.0);
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay_seconds = seconds.max(0.0);
        self
    }

    pub fn threshold(mut self, threshold: ViewportFraction) -> Self {
        self.trigger_threshold = threshold;
        self
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    pub fn continuous(mut self) -> Self {
        self.mode = RevealMode::Continuous;
        self
    }

    pub fn variant(mut self, variant: SectionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn scrub_range(mut self, range: ScrubRange) -> Self {
        self.scrub_range = range;
        self
    }

    /// Whether the trigger's top edge is at or above the trigger line
    pub fn is_triggered(&self, trigger_top: f32, scroll_y: f32, viewport_height: f32) -> bool {
        trigger_top - scroll_y <= self.trigger_threshold.trigger_line(viewport_height)
    }
}

/// Lifecycle state of an animation handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlePhase {
    /// Registered; targets hold their initial style
    Idle,
    /// Waiting for the trigger line
    Armed,
    Playing,
    Settled,
    Reversing,
    /// Scroll-scrubbed; follows the scroll position
    Scrubbing,
    Cancelled,
}

impl HandlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HandlePhase::Cancelled)
    }
}

/// Transition counters, for inspection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandleStats {
    /// Transitions into Playing
    pub plays: u32,
    /// Transitions into Reversing
    pub reversals: u32,
}

struct AnimationHandle {
    intent: Weak<RevealIntent>,
    phase: HandlePhase,
    timeline: Option<TimelineId>,
    stats: HandleStats,
    scrub_fraction: f32,
}

/// Stagger bookkeeping for one trigger element within one dispatch
struct FireGroup {
    stamp: (u64, u64),
    next_offset_ms: f32,
}

#[derive(Default)]
pub(crate) struct Sequencer {
    handles: SlotMap<IntentKey, AnimationHandle>,
    fire_groups: FxHashMap<ElementId, FireGroup>,
}

impl Sequencer {
    /// Register an intent; its targets take the preset's initial style
    pub(crate) fn register(
        &mut self,
        intent: &Rc<RevealIntent>,
        host: &mut dyn DocumentHost,
    ) -> IntentKey {
        for (target, style) in initial_styles(intent, &*host) {
            host.set_style(target, style);
        }
        let key = self.handles.insert(AnimationHandle {
            intent: Rc::downgrade(intent),
            phase: HandlePhase::Idle,
            timeline: None,
            stats: HandleStats::default(),
            scrub_fraction: 0.0,
        });
        tracing::debug!(
            "Sequencer: registered {:?} ({} targets, {})",
            key,
            intent.targets.len(),
            intent.preset
        );
        key
    }

    pub(crate) fn phase(&self, key: IntentKey) -> Option<HandlePhase> {
        self.handles.get(key).map(|handle| handle.phase)
    }

    pub(crate) fn stats(&self, key: IntentKey) -> Option<HandleStats> {
        self.handles.get(key).map(|handle| handle.stats)
    }

    pub(crate) fn scrub_fraction(&self, key: IntentKey) -> Option<f32> {
        self.handles
            .get(key)
            .filter(|handle| handle.phase == HandlePhase::Scrubbing)
            .map(|handle| handle.scrub_fraction)
    }

    pub(crate) fn timeline(&self, key: IntentKey) -> Option<TimelineId> {
        self.handles.get(key).and_then(|handle| handle.timeline)
    }

    /// Live (non-cancelled) handles
    pub(crate) fn len(&self) -> usize {
        self.handles
            .values()
            .filter(|handle| !handle.phase.is_terminal())
            .count()
    }

    /// Cancel a handle, removing its timeline immediately
    pub(crate) fn cancel(&mut self, key: IntentKey, timelines: &mut SlotMap<TimelineId, Timeline>) {
        cancel_handle(&mut self.handles, key, timelines);
    }

    /// React to a scroll snapshot
    ///
    /// Returns the timeline whose styles changed outside the regular tick.
    pub(crate) fn evaluate(
        &mut self,
        key: IntentKey,
        snapshot: &ScrollSnapshot,
        frame: u64,
        host: &mut dyn DocumentHost,
        timelines: &mut SlotMap<TimelineId, Timeline>,
    ) -> Option<TimelineId> {
        let Sequencer {
            handles,
            fire_groups,
        } = self;

        let handle = handles.get_mut(key)?;
        if handle.phase.is_terminal() {
            return None;
        }
        let Some(intent) = handle.intent.upgrade() else {
            cancel_handle(handles, key, timelines);
            return None;
        };

        let trigger = host.element_bounds(intent.trigger);
        let any_target = intent.targets.iter().any(|el| host.is_attached(*el));
        let (Some(trigger), true) = (trigger, any_target) else {
            if matches!(handle.phase, HandlePhase::Idle | HandlePhase::Armed) {
                tracing::debug!("Sequencer: dropping {:?}, trigger or targets left the document", key);
                cancel_handle(handles, key, timelines);
            }
            return None;
        };

        let state = &snapshot.state;

        if intent.preset.is_scrubbed() {
            let fraction = intent.scrub_range.fraction(
                trigger.top(),
                trigger.height,
                state.scroll_y,
                state.viewport_height,
            );
            let id = match handle.timeline.filter(|id| timelines.contains_key(*id)) {
                Some(id) => id,
                None => {
                    let (timeline, _) = build_timeline(&intent, &*host, 0.0);
                    let id = timelines.insert(timeline);
                    handle.timeline = Some(id);
                    id
                }
            };
            if let Some(timeline) = timelines.get_mut(id) {
                timeline.seek(fraction * timeline.duration_ms());
            }
            handle.phase = HandlePhase::Scrubbing;
            handle.scrub_fraction = fraction;
            return Some(id);
        }

        if handle.phase == HandlePhase::Idle {
            handle.phase = HandlePhase::Armed;
        }

        let reached = intent.is_triggered(trigger.top(), state.scroll_y, state.viewport_height);
        let reverses = intent.repeatable && intent.mode == RevealMode::Entrance;

        match (handle.phase, reached) {
            (HandlePhase::Armed, true) => {
                let id = match handle.timeline.filter(|id| timelines.contains_key(*id)) {
                    Some(id) => id,
                    None => {
                        let stamp = (snapshot.seq, frame);
                        let base_ms = match fire_groups.get(&intent.trigger) {
                            Some(group) if group.stamp == stamp => group.next_offset_ms,
                            _ => 0.0,
                        };
                        let (mut timeline, next_offset_ms) = build_timeline(&intent, &*host, base_ms);
                        if intent.mode == RevealMode::Continuous {
                            timeline.set_alternate(true);
                        }
                        fire_groups.insert(
                            intent.trigger,
                            FireGroup {
                                stamp,
                                next_offset_ms,
                            },
                        );
                        let id = timelines.insert(timeline);
                        handle.timeline = Some(id);
                        id
                    }
                };
                if let Some(timeline) = timelines.get_mut(id) {
                    timeline.play();
                }
                handle.phase = HandlePhase::Playing;
                handle.stats.plays += 1;
                tracing::debug!("Sequencer: {:?} Armed -> Playing", key);
                Some(id)
            }
            (HandlePhase::Playing | HandlePhase::Settled, false) if reverses => {
                let id = handle.timeline?;
                if let Some(timeline) = timelines.get_mut(id) {
                    timeline.reverse();
                }
                tracing::debug!("Sequencer: {:?} {:?} -> Reversing", key, handle.phase);
                handle.phase = HandlePhase::Reversing;
                handle.stats.reversals += 1;
                Some(id)
            }
            (HandlePhase::Reversing, true) => {
                let id = handle.timeline?;
                if let Some(timeline) = timelines.get_mut(id) {
                    timeline.play();
                }
                handle.phase = HandlePhase::Playing;
                handle.stats.plays += 1;
                tracing::debug!("Sequencer: {:?} Reversing -> Playing", key);
                Some(id)
            }
            _ => None,
        }
    }

    /// Settle finished handles and drop cancelled ones
    pub(crate) fn after_tick(&mut self, timelines: &SlotMap<TimelineId, Timeline>) {
        for (key, handle) in self.handles.iter_mut() {
            let Some(timeline) = handle.timeline.and_then(|id| timelines.get(id)) else {
                continue;
            };
            if timeline.is_playing() {
                continue;
            }
            match handle.phase {
                HandlePhase::Playing if timeline.is_at_end() => {
                    handle.phase = HandlePhase::Settled;
                    tracing::debug!("Sequencer: {:?} Playing -> Settled", key);
                }
                HandlePhase::Reversing if timeline.is_at_start() => {
                    handle.phase = HandlePhase::Armed;
                    tracing::debug!("Sequencer: {:?} Reversing -> Armed", key);
                }
                _ => {}
            }
        }
        self.handles.retain(|_, handle| !handle.phase.is_terminal());
    }
}

fn cancel_handle(
    handles: &mut SlotMap<IntentKey, AnimationHandle>,
    key: IntentKey,
    timelines: &mut SlotMap<TimelineId, Timeline>,
) {
    let Some(handle) = handles.get_mut(key) else {
        return;
    };
    if let Some(id) = handle.timeline.take() {
        timelines.remove(id);
    }
    handle.intent = Weak::new();
    handle.phase = HandlePhase::Cancelled;
    tracing::debug!("Sequencer: {:?} cancelled", key);
}

/// Initial style of every attached target
fn initial_styles(
    intent: &RevealIntent,
    host: &dyn DocumentHost,
) -> SmallVec<[(StyleTarget, ElementStyle); 16]> {
    let mut out = SmallVec::new();
    for (position, element) in intent.targets.iter().copied().enumerate() {
        if !host.is_attached(element) {
            continue;
        }
        if intent.preset == Preset::CharReveal && position == 0 {
            if let Some(text) = host.element_text(element) {
                out.extend(
                    split_glyphs(&text)
                        .iter()
                        .filter(|unit| unit.is_animated())
                        .map(|unit| {
                            (
                                StyleTarget::glyph(element, unit.index),
                                Preset::glyph_initial_style(),
                            )
                        }),
                );
                continue;
            }
        }
        out.push((StyleTarget::element(element), intent.preset.initial_style()));
    }
    out
}

/// Build the reveal timeline for an intent, starting at `base_ms`
///
/// Returns the timeline and the offset where its target run ended.
pub(crate) fn build_timeline(
    intent: &RevealIntent,
    host: &dyn DocumentHost,
    base_ms: f32,
) -> (Timeline, f32) {
    let mut timeline = Timeline::new();
    let preset = intent.preset;
    let live: SmallVec<[ElementId; 8]> = intent
        .targets
        .iter()
        .copied()
        .filter(|el| host.is_attached(*el))
        .collect();

    if preset.is_scrubbed() {
        for element in &live {
            timeline.add(
                StyleTarget::element(*element),
                0.0,
                SCRUB_SPAN_MS,
                preset.initial_style(),
                preset.final_style(),
            );
        }
        return (timeline, base_ms);
    }

    let start_ms = base_ms + intent.delay_seconds * 1000.0;
    let stagger_ms = intent.stagger_seconds * 1000.0;
    let mut followers = live.clone();
    let mut follow_start_ms = start_ms;

    if preset == Preset::CharReveal {
        let headline = intent
            .targets
            .first()
            .copied()
            .filter(|el| host.is_attached(*el))
            .and_then(|el| host.element_text(el).map(|text| (el, text)));

        if let Some((headline, text)) = headline {
            followers.retain(|el| *el != headline);
            let glyph_easing = intent.variant.flavour(Easing::BACK_OUT);
            let mut run = timeline.stagger(start_ms, GLYPH_STAGGER_MS);
            for unit in split_glyphs(&text).iter().filter(|unit| unit.is_animated()) {
                run = run.entry(
                    StyleTarget::glyph(headline, unit.index),
                    GLYPH_DURATION_MS,
                    glyph_easing,
                    Preset::glyph_initial_style(),
                    ElementStyle::IDENTITY,
                );
            }
            let glyphs = run.finish().len();
            if glyphs > 0 {
                let glyph_end_ms =
                    start_ms + (glyphs - 1) as f32 * GLYPH_STAGGER_MS + GLYPH_DURATION_MS;
                follow_start_ms = (glyph_end_ms - FOLLOW_OVERLAP_MS).max(start_ms);
            }
        }
    }

    let easing = intent.variant.flavour(preset.easing());
    let mut run = timeline.stagger(follow_start_ms, stagger_ms);
    for element in &followers {
        run = run.entry(
            StyleTarget::element(*element),
            preset.duration_ms(),
            easing,
            preset.initial_style(),
            preset.final_style(),
        );
    }
    let run_end_ms = run.next_offset_ms();
    (timeline, run_end_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::document::{Bounds, HeadlessDocument};

    fn doc_with_targets(n: usize) -> (HeadlessDocument, ElementId, Vec<ElementId>) {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        let section = doc.insert_section("about", 1000.0, 800.0);
        let targets = (0..n)
            .map(|i| doc.insert_element(None, Bounds::new(0.0, 1000.0 + i as f32 * 100.0, 600.0, 80.0)))
            .collect();
        (doc, section, targets)
    }

    #[test]
    fn test_trigger_line() {
        let (_, section, _) = doc_with_targets(0);
        let intent = RevealIntent::new(section, Preset::FadeRise);
        // Line sits at 750px from the viewport top
        assert!(!intent.is_triggered(1000.0, 249.0, 1000.0));
        assert!(intent.is_triggered(1000.0, 250.0, 1000.0));
        assert!(intent.is_triggered(1000.0, 900.0, 1000.0));

        let eager = intent.threshold(ViewportFraction::new(0.0));
        assert!(eager.is_triggered(1000.0, 0.0, 1000.0));
    }

    #[test]
    fn test_build_staggers_targets() {
        let (doc, section, targets) = doc_with_targets(3);
        let intent = RevealIntent::new(section, Preset::SlideFromLeft)
            .targets(targets)
            .stagger(0.3)
            .delay(0.5);

        let (timeline, run_end) = build_timeline(&intent, &doc, 0.0);
        let offsets: Vec<f32> = timeline.entries().iter().map(|e| e.offset_ms).collect();
        assert_eq!(offsets, vec![500.0, 800.0, 1100.0]);
        assert_eq!(run_end, 1400.0);
        assert_eq!(timeline.entries()[0].from.translate_x, -80.0);
    }

    #[test]
    fn test_build_skips_removed_targets() {
        let (mut doc, section, targets) = doc_with_targets(3);
        doc.remove_element(targets[1]);
        let intent = RevealIntent::new(section, Preset::FadeRise).targets(targets.clone());

        let (timeline, _) = build_timeline(&intent, &doc, 0.0);
        let built: Vec<ElementId> = timeline.entries().iter().map(|e| e.target.element).collect();
        assert_eq!(built, vec![targets[0], targets[2]]);
    }

    #[test]
    fn test_char_reveal_layout() {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        let section = doc.insert_section("skills", 1000.0, 800.0);
        let title = doc.insert_text(None, Bounds::new(0.0, 1000.0, 600.0, 80.0), "My Skills");
        let body = doc.insert_element(None, Bounds::new(0.0, 1100.0, 600.0, 300.0));
        let intent = RevealIntent::new(section, Preset::CharReveal).targets([title, body]);

        let (timeline, _) = build_timeline(&intent, &doc, 0.0);
        let glyphs: Vec<_> = timeline
            .entries()
            .iter()
            .filter(|e| e.target.glyph.is_some())
            .collect();
        // "My Skills" has eight visible glyphs; the space is skipped
        assert_eq!(glyphs.len(), 8);
        assert!(glyphs.iter().all(|e| e.target.glyph != Some(2)));
        assert_eq!(glyphs[7].offset_ms, 7.0 * GLYPH_STAGGER_MS);

        let follow = timeline
            .entries()
            .iter()
            .find(|e| e.target == StyleTarget::element(body))
            .unwrap();
        // Glyph run ends at 210 + 600; follow-up starts 300ms earlier
        assert_eq!(follow.offset_ms, 510.0);
        assert_eq!(follow.duration_ms, 500.0);
    }

    #[test]
    fn test_initial_styles_hide_targets() {
        let (doc, section, targets) = doc_with_targets(2);
        let intent = RevealIntent::new(section, Preset::ScaleIn).targets(targets);
        let styles = initial_styles(&intent, &doc);
        assert_eq!(styles.len(), 2);
        assert!(styles.iter().all(|(_, s)| s.opacity == 0.0 && s.scale == 0.8));
    }
}
