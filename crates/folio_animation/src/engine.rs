//! Animation engine
//!
//! One engine exists per page. It owns every running timeline and spring,
//! the reveal sequencer and the smooth-scroll tween, and is advanced by the
//! page's frame loop.
//!
//! Components never hold the engine itself. They get an [`EngineHandle`], a
//! weak reference exposing timeline creation, scroll-trigger binding,
//! springs and scroll-to. Once the engine is dropped every handle operation
//! becomes a no-op.
//!
//! # Frame order
//!
//! ```text
//! engine.tick(dt)       scroll tween writes scroll_y, timelines and springs advance
//! observer.poll(now)    one snapshot reaches every subscriber (reveal triggers fire here)
//! engine.flush_styles() sampled styles of everything that moved are written to the host
//! ```

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::sequencer::{HandlePhase, HandleStats, RevealIntent, Sequencer};
use crate::spring::{Spring, SpringConfig};
use crate::timeline::Timeline;
use folio_core::document::SharedHost;
use folio_core::scroll::{ScrollObserver, ScrollSnapshot, Subscription, SCROLL_EPSILON};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
    /// Handle to a registered spring
    pub struct SpringId;
    /// Handle to a bound reveal intent
    pub struct IntentKey;
}

/// How a scroll tween ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Reached its target
    Completed,
    /// Replaced by a newer tween, cancelled, or overridden by user scroll
    Interrupted,
}

/// Identifier of one scroll-to request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollTweenId(u64);

type FinishCallback = Box<dyn FnOnce(ScrollOutcome)>;

struct ScrollTween {
    id: ScrollTweenId,
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: Easing,
    /// Last offset this tween wrote; anything else on the host means the
    /// user scrolled
    last_written: f32,
    on_finish: Option<FinishCallback>,
}

struct EngineInner {
    host: SharedHost,
    timelines: SlotMap<TimelineId, Timeline>,
    springs: SlotMap<SpringId, Spring>,
    sequencer: Sequencer,
    scroll: Option<ScrollTween>,
    next_tween: u64,
    /// Timelines whose sampled styles must be written on the next flush
    dirty: SmallVec<[TimelineId; 16]>,
    frame: u64,
}

impl EngineInner {
    fn mark_dirty(dirty: &mut SmallVec<[TimelineId; 16]>, id: TimelineId) {
        if !dirty.contains(&id) {
            dirty.push(id);
        }
    }

    fn advance_scroll(&mut self, dt_ms: f32) -> Option<(FinishCallback, ScrollOutcome)> {
        let mut host = self.host.borrow_mut();
        let tween = self.scroll.as_mut()?;

        let outcome = if (host.scroll_y() - tween.last_written).abs() > SCROLL_EPSILON {
            tracing::debug!("AnimationEngine: user scroll interrupted {:?}", tween.id);
            ScrollOutcome::Interrupted
        } else {
            tween.elapsed_ms += dt_ms;
            let t = if tween.duration_ms <= 0.0 {
                1.0
            } else {
                (tween.elapsed_ms / tween.duration_ms).min(1.0)
            };
            host.set_scroll_y(tween.from + (tween.to - tween.from) * tween.easing.apply(t));
            tween.last_written = host.scroll_y();
            if t < 1.0 {
                return None;
            }
            ScrollOutcome::Completed
        };

        let mut tween = self.scroll.take()?;
        tween.on_finish.take().map(|callback| (callback, outcome))
    }

    fn has_active_animations(&self) -> bool {
        self.scroll.is_some()
            || self.timelines.values().any(Timeline::is_playing)
            || self.springs.values().any(|spring| !spring.is_settled())
    }
}

impl Drop for EngineInner {
    fn drop(&mut self) {
        if let Some(callback) = self.scroll.take().and_then(|mut tween| tween.on_finish.take()) {
            callback(ScrollOutcome::Interrupted);
        }
    }
}

/// Owner of all page animation state
///
/// Dropping the engine stops everything; outstanding handles go inert.
pub struct AnimationEngine {
    inner: Rc<RefCell<EngineInner>>,
}

impl AnimationEngine {
    pub fn new(host: SharedHost) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EngineInner {
                host,
                timelines: SlotMap::with_key(),
                springs: SlotMap::with_key(),
                sequencer: Sequencer::default(),
                scroll: None,
                next_tween: 0,
                dirty: SmallVec::new(),
                frame: 0,
            })),
        }
    }

    /// Weak handle for components
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn host(&self) -> SharedHost {
        self.inner.borrow().host.clone()
    }

    /// Advance all animations by `dt_ms`
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let (finished, active) = {
            let mut guard = self.inner.borrow_mut();
            guard.frame += 1;
            let finished = guard.advance_scroll(dt_ms);

            let EngineInner {
                timelines,
                springs,
                sequencer,
                dirty,
                ..
            } = &mut *guard;
            for (id, timeline) in timelines.iter_mut() {
                if timeline.is_playing() {
                    timeline.tick(dt_ms);
                    EngineInner::mark_dirty(dirty, id);
                }
            }
            let dt_secs = dt_ms / 1000.0;
            for spring in springs.values_mut() {
                spring.step(dt_secs);
            }
            sequencer.after_tick(timelines);

            (finished, guard.has_active_animations())
        };

        // Callbacks run with the engine released
        if let Some((callback, outcome)) = finished {
            callback(outcome);
        }
        active
    }

    /// Write the current style of every timeline that moved since the last
    /// flush; returns the number of styles written
    pub fn flush_styles(&self) -> usize {
        let mut guard = self.inner.borrow_mut();
        let EngineInner {
            host,
            timelines,
            dirty,
            ..
        } = &mut *guard;
        let mut host = host.borrow_mut();
        let mut written = 0;
        for id in dirty.drain(..) {
            let Some(timeline) = timelines.get(id) else {
                continue;
            };
            for (target, style) in timeline.sample() {
                host.set_style(target, style);
                written += 1;
            }
        }
        written
    }

    pub fn has_active_animations(&self) -> bool {
        self.inner.borrow().has_active_animations()
    }

    pub fn timeline_count(&self) -> usize {
        self.inner.borrow().timelines.len()
    }

    pub fn spring_count(&self) -> usize {
        self.inner.borrow().springs.len()
    }

    /// Bound reveal intents that are not cancelled
    pub fn intent_count(&self) -> usize {
        self.inner.borrow().sequencer.len()
    }
}

/// Weak handle to the [`AnimationEngine`]
#[derive(Clone)]
pub struct EngineHandle {
    inner: Weak<RefCell<EngineInner>>,
}

impl EngineHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    // =========================================================================
    // Timelines
    // =========================================================================

    /// Hand a timeline to the engine; it is ticked and flushed from now on
    pub fn create_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = inner.borrow_mut();
            let id = guard.timelines.insert(timeline);
            EngineInner::mark_dirty(&mut guard.dirty, id);
            id
        })
    }

    /// Mutate a timeline; it is flushed on the next frame
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.borrow_mut();
        let EngineInner {
            timelines, dirty, ..
        } = &mut *guard;
        let result = timelines.get_mut(id).map(f);
        if result.is_some() {
            EngineInner::mark_dirty(dirty, id);
        }
        result
    }

    pub fn is_timeline_playing(&self, id: TimelineId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow().timelines.get(id).map(Timeline::is_playing))
            .unwrap_or(false)
    }

    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().timelines.remove(id);
        }
    }

    // =========================================================================
    // Springs
    // =========================================================================

    pub fn register_spring(&self, config: SpringConfig, initial: f32) -> Option<SpringId> {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().springs.insert(Spring::new(config, initial)))
    }

    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(spring) = inner.borrow_mut().springs.get_mut(id) {
                spring.set_target(target);
            }
        }
    }

    /// Jump a spring to `value` without animating
    pub fn snap_spring(&self, id: SpringId, value: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(spring) = inner.borrow_mut().springs.get_mut(id) {
                spring.snap_to(value);
            }
        }
    }

    pub fn spring_value(&self, id: SpringId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let value = inner.borrow().springs.get(id).map(Spring::value);
        value
    }

    pub fn is_spring_settled(&self, id: SpringId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.borrow().springs.get(id).map(Spring::is_settled))
            .unwrap_or(true)
    }

    pub fn remove_spring(&self, id: SpringId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().springs.remove(id);
        }
    }

    // =========================================================================
    // Scroll triggers
    // =========================================================================

    /// Register a reveal intent and subscribe it to the observer
    ///
    /// Targets take their initial style immediately. The intent is evaluated
    /// once against the current scroll position, so a section already past
    /// its trigger line fires without waiting for a scroll. Dropping the
    /// returned [`ScrollTrigger`] cancels the animation and unsubscribes.
    pub fn bind_scroll_trigger(
        &self,
        observer: &ScrollObserver,
        intent: &Rc<RevealIntent>,
    ) -> Result<ScrollTrigger> {
        let key = {
            let inner = self.inner.upgrade().ok_or(AnimationError::EngineDropped)?;
            let mut guard = inner.borrow_mut();
            let EngineInner {
                host, sequencer, ..
            } = &mut *guard;
            let mut host = host.borrow_mut();
            sequencer.register(intent, &mut *host)
        };

        let engine = self.clone();
        let subscription = observer.subscribe(move |snapshot| engine.evaluate(key, snapshot));
        self.evaluate(key, &observer.snapshot());

        Ok(ScrollTrigger {
            engine: self.clone(),
            key,
            subscription: Some(subscription),
        })
    }

    fn evaluate(&self, key: IntentKey, snapshot: &ScrollSnapshot) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let Ok(mut guard) = inner.try_borrow_mut() else {
            tracing::warn!("AnimationEngine: engine busy, skipping trigger {:?}", key);
            return;
        };
        let EngineInner {
            host,
            timelines,
            sequencer,
            dirty,
            frame,
            ..
        } = &mut *guard;
        let mut host = host.borrow_mut();
        if let Some(id) = sequencer.evaluate(key, snapshot, *frame, &mut *host, timelines) {
            EngineInner::mark_dirty(dirty, id);
        }
    }

    pub fn phase(&self, key: IntentKey) -> Option<HandlePhase> {
        let inner = self.inner.upgrade()?;
        let phase = inner.borrow().sequencer.phase(key);
        phase
    }

    pub fn stats(&self, key: IntentKey) -> Option<HandleStats> {
        let inner = self.inner.upgrade()?;
        let stats = inner.borrow().sequencer.stats(key);
        stats
    }

    /// Current fraction of a scrubbed intent
    pub fn scrub_fraction(&self, key: IntentKey) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let fraction = inner.borrow().sequencer.scrub_fraction(key);
        fraction
    }

    /// Timeline backing an intent, once it has fired
    pub fn intent_timeline(&self, key: IntentKey) -> Option<TimelineId> {
        let inner = self.inner.upgrade()?;
        let id = inner.borrow().sequencer.timeline(key);
        id
    }

    /// Cancel an intent; its timeline is removed immediately
    pub fn cancel_intent(&self, key: IntentKey) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let Ok(mut guard) = inner.try_borrow_mut() else {
            tracing::warn!("AnimationEngine: engine busy, could not cancel {:?}", key);
            return;
        };
        let EngineInner {
            timelines,
            sequencer,
            ..
        } = &mut *guard;
        sequencer.cancel(key, timelines);
    }

    // =========================================================================
    // Scroll-to
    // =========================================================================

    /// Tween the host's scroll offset to `target_y`
    ///
    /// The tween starts from the current offset. A tween already in flight is
    /// replaced and its callback receives [`ScrollOutcome::Interrupted`]. A
    /// scroll offset change the tween did not write (user scroll) also
    /// interrupts it. Callbacks run with the engine released but must not
    /// expect a particular frame.
    pub fn scroll_to<F>(
        &self,
        target_y: f32,
        duration_ms: f32,
        easing: Easing,
        on_finish: F,
    ) -> Option<ScrollTweenId>
    where
        F: FnOnce(ScrollOutcome) + 'static,
    {
        let inner = self.inner.upgrade()?;
        let (id, replaced, immediate) = {
            let mut guard = inner.borrow_mut();
            let replaced = guard
                .scroll
                .take()
                .and_then(|mut tween| tween.on_finish.take());

            let (from, to) = {
                let host = guard.host.borrow();
                (host.scroll_y(), target_y.clamp(0.0, host.max_scroll()))
            };
            guard.next_tween += 1;
            let id = ScrollTweenId(guard.next_tween);
            let mut tween = ScrollTween {
                id,
                from,
                to,
                elapsed_ms: 0.0,
                duration_ms: duration_ms.max(0.0),
                easing,
                last_written: from,
                on_finish: Some(Box::new(on_finish)),
            };

            let immediate = if tween.duration_ms <= 0.0 {
                guard.host.borrow_mut().set_scroll_y(to);
                tween.on_finish.take()
            } else {
                tracing::debug!(
                    "AnimationEngine: scroll {:?} {} -> {} over {}ms",
                    id,
                    from,
                    to,
                    tween.duration_ms
                );
                guard.scroll = Some(tween);
                None
            };
            (id, replaced, immediate)
        };

        if let Some(callback) = replaced {
            callback(ScrollOutcome::Interrupted);
        }
        if let Some(callback) = immediate {
            callback(ScrollOutcome::Completed);
        }
        Some(id)
    }

    /// Stop the scroll tween in flight; returns whether one was running
    pub fn cancel_scroll(&self) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let tween = inner.borrow_mut().scroll.take();
        match tween {
            Some(mut tween) => {
                if let Some(callback) = tween.on_finish.take() {
                    callback(ScrollOutcome::Interrupted);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().scroll.is_some())
            .unwrap_or(false)
    }

    /// Destination of the tween in flight
    pub fn scroll_target(&self) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let target = inner.borrow().scroll.as_ref().map(|tween| tween.to);
        target
    }
}

/// Live binding of a reveal intent to the scroll observer
///
/// Dropping it cancels the animation handle and removes the observer
/// subscription.
pub struct ScrollTrigger {
    engine: EngineHandle,
    key: IntentKey,
    subscription: Option<Subscription>,
}

impl ScrollTrigger {
    pub fn key(&self) -> IntentKey {
        self.key
    }

    pub fn phase(&self) -> Option<HandlePhase> {
        self.engine.phase(self.key)
    }

    pub fn stats(&self) -> Option<HandleStats> {
        self.engine.stats(self.key)
    }

    /// Cancel now
    pub fn cancel(self) {}
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        self.subscription.take();
        self.engine.cancel_intent(self.key);
    }
}

impl std::fmt::Debug for ScrollTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTrigger")
            .field("key", &self.key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{Preset, ScrubRange};
    use crate::sequencer::ViewportFraction;
    use folio_core::document::{
        share, Bounds, DocumentHost, ElementId, ElementStyle, HeadlessDocument, StyleTarget,
    };
    use std::cell::Cell;

    struct Fixture {
        host: Rc<RefCell<HeadlessDocument>>,
        observer: ScrollObserver,
        engine: AnimationEngine,
        section: ElementId,
        targets: Vec<ElementId>,
        now: f64,
    }

    impl Fixture {
        /// Viewport 1000; "about" spans 2000..2800 with three child targets
        fn new() -> Self {
            let mut doc = HeadlessDocument::new(1280.0, 1000.0);
            doc.insert_section("home", 0.0, 2000.0);
            let section = doc.insert_section("about", 2000.0, 800.0);
            doc.insert_section("contact", 2800.0, 2200.0);
            let targets = (0..3)
                .map(|i| {
                    doc.insert_element(None, Bounds::new(0.0, 2000.0 + i as f32 * 200.0, 600.0, 150.0))
                })
                .collect();
            let host = share(doc);
            let observer = ScrollObserver::new(host.clone(), ["home", "about", "contact"]);
            observer.mount();
            let engine = AnimationEngine::new(host.clone());
            Self {
                host,
                observer,
                engine,
                section,
                targets,
                now: 0.0,
            }
        }

        fn intent(&self, preset: Preset) -> RevealIntent {
            RevealIntent::new(self.section, preset).targets(self.targets.iter().copied())
        }

        fn scroll(&mut self, y: f32) {
            self.host.borrow_mut().set_scroll_y(y);
            self.frame(16.0);
        }

        fn frame(&mut self, dt_ms: f32) {
            self.now += dt_ms as f64;
            self.engine.tick(dt_ms);
            self.observer.poll(self.now);
            self.engine.flush_styles();
        }

        fn run(&mut self, ms: f32) {
            let frames = (ms / 16.0).ceil() as usize;
            for _ in 0..frames {
                self.frame(16.0);
            }
        }

        fn style(&self, element: ElementId) -> Option<ElementStyle> {
            self.host.borrow().style(StyleTarget::element(element))
        }
    }

    #[test]
    fn test_entrance_lifecycle() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();

        // Bound below the fold: armed, targets hidden
        assert_eq!(trigger.phase(), Some(HandlePhase::Armed));
        assert_eq!(fx.style(fx.targets[0]).unwrap().opacity, 0.0);

        // Trigger line is at 750px: top 2000 crosses once scroll_y >= 1250
        fx.scroll(1200.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Armed));
        fx.scroll(1300.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));

        fx.run(1000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Settled));
        for target in &fx.targets {
            assert_eq!(fx.style(*target), Some(ElementStyle::IDENTITY));
        }
    }

    #[test]
    fn test_non_repeatable_plays_once() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::ScaleIn).repeatable(false));
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();

        for _ in 0..5 {
            fx.scroll(1500.0);
            fx.run(200.0);
            fx.scroll(0.0);
            fx.run(200.0);
        }

        assert_eq!(trigger.stats().unwrap().plays, 1);
        assert_eq!(trigger.stats().unwrap().reversals, 0);
        fx.run(1000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Settled));
    }

    #[test]
    fn test_repeatable_reverses_and_rearms() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();

        fx.scroll(1500.0);
        fx.run(1000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Settled));

        fx.scroll(0.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Reversing));
        fx.run(1000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Armed));
        assert_eq!(fx.style(fx.targets[2]).unwrap().opacity, 0.0);

        fx.scroll(1500.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));
        assert_eq!(trigger.stats().unwrap().plays, 2);
    }

    #[test]
    fn test_reverse_in_place_and_resume() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::SlideFromLeft));
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();

        fx.scroll(1500.0);
        fx.run(160.0);
        fx.scroll(0.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Reversing));
        fx.scroll(1500.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));
        // The half-played timeline was reused, not rebuilt
        assert_eq!(fx.engine.timeline_count(), 1);
    }

    #[test]
    fn test_drop_cancels_and_unsubscribes() {
        let mut fx = Fixture::new();
        let baseline = fx.observer.subscriber_count();
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let handle = fx.engine.handle();
        let trigger = handle.bind_scroll_trigger(&fx.observer, &intent).unwrap();
        let key = trigger.key();
        assert_eq!(fx.observer.subscriber_count(), baseline + 1);

        fx.scroll(1500.0);
        assert_eq!(fx.engine.timeline_count(), 1);

        drop(trigger);
        assert_eq!(fx.observer.subscriber_count(), baseline);
        assert_eq!(fx.engine.timeline_count(), 0);
        assert_eq!(handle.phase(key), Some(HandlePhase::Cancelled));

        fx.frame(16.0);
        assert_eq!(handle.phase(key), None);
        assert_eq!(fx.engine.intent_count(), 0);
    }

    #[test]
    fn test_removed_trigger_drops_intent() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let handle = fx.engine.handle();
        let trigger = handle.bind_scroll_trigger(&fx.observer, &intent).unwrap();

        fx.host.borrow_mut().remove_element(fx.section);
        fx.scroll(1500.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Cancelled));
        fx.frame(16.0);
        assert_eq!(trigger.phase(), None);
    }

    #[test]
    fn test_removed_targets_skipped_individually() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let handle = fx.engine.handle();
        let trigger = handle.bind_scroll_trigger(&fx.observer, &intent).unwrap();

        fx.host.borrow_mut().remove_element(fx.targets[0]);
        fx.scroll(1500.0);
        fx.run(1000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Settled));
        assert_eq!(fx.style(fx.targets[1]), Some(ElementStyle::IDENTITY));
        assert_eq!(fx.style(fx.targets[0]), None);
    }

    #[test]
    fn test_shared_trigger_staggers_are_additive() {
        let mut fx = Fixture::new();
        let handle = fx.engine.handle();
        let first = Rc::new(fx.intent(Preset::FadeRise).stagger(0.2));
        let second = Rc::new(fx.intent(Preset::ScaleIn).stagger(0.1));
        let a = handle.bind_scroll_trigger(&fx.observer, &first).unwrap();
        let b = handle.bind_scroll_trigger(&fx.observer, &second).unwrap();

        fx.scroll(1500.0);
        let offsets = |key| {
            let id = handle.intent_timeline(key).unwrap();
            handle
                .with_timeline(id, |tl| tl.entries().iter().map(|e| e.offset_ms).collect::<Vec<_>>())
                .unwrap()
        };
        assert_eq!(offsets(a.key()), vec![0.0, 200.0, 400.0]);
        assert_eq!(offsets(b.key()), vec![600.0, 700.0, 800.0]);
    }

    #[test]
    fn test_continuous_never_settles() {
        let mut fx = Fixture::new();
        let intent = Rc::new(fx.intent(Preset::FadeRise).continuous());
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();

        fx.scroll(1500.0);
        fx.run(3000.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));
        // Scrolling away does not reverse a looping reveal
        fx.scroll(0.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));
        assert!(fx.engine.has_active_animations());
    }

    #[test]
    fn test_already_visible_fires_at_bind() {
        let mut fx = Fixture::new();
        fx.scroll(1800.0);
        let intent = Rc::new(fx.intent(Preset::FadeRise));
        let trigger = fx.engine.handle().bind_scroll_trigger(&fx.observer, &intent).unwrap();
        assert_eq!(trigger.phase(), Some(HandlePhase::Playing));
    }

    #[test]
    fn test_scrub_follows_scroll() {
        let mut fx = Fixture::new();
        let intent = Rc::new(
            fx.intent(Preset::ProgressScrub)
                .scrub_range(ScrubRange::Traversal)
                .threshold(ViewportFraction::new(1.0)),
        );
        let handle = fx.engine.handle();
        let trigger = handle.bind_scroll_trigger(&fx.observer, &intent).unwrap();

        // Range 1000..2800
        fx.scroll(1900.0);
        assert_eq!(trigger.phase(), Some(HandlePhase::Scrubbing));
        assert_eq!(handle.scrub_fraction(trigger.key()), Some(0.5));
        assert_eq!(fx.style(fx.targets[0]).unwrap().scale, 0.5);

        fx.scroll(1000.0);
        assert_eq!(handle.scrub_fraction(trigger.key()), Some(0.0));
    }

    #[test]
    fn test_scroll_to_completes() {
        let mut fx = Fixture::new();
        let outcome = Rc::new(Cell::new(None));
        let slot = outcome.clone();
        fx.engine
            .handle()
            .scroll_to(2720.0, 1500.0, Easing::CubicOut, move |o| slot.set(Some(o)))
            .unwrap();

        fx.run(800.0);
        let midway = fx.host.borrow().scroll_y();
        assert!(midway > 0.0 && midway < 2720.0);
        assert_eq!(outcome.get(), None);

        fx.run(800.0);
        assert_eq!(outcome.get(), Some(ScrollOutcome::Completed));
        assert_eq!(fx.host.borrow().scroll_y(), 2720.0);
    }

    #[test]
    fn test_scroll_to_replaced_interrupts() {
        let mut fx = Fixture::new();
        let handle = fx.engine.handle();
        let first = Rc::new(Cell::new(None));
        let slot = first.clone();
        handle.scroll_to(3000.0, 1500.0, Easing::CubicOut, move |o| slot.set(Some(o)));
        fx.run(320.0);
        let at_switch = fx.host.borrow().scroll_y();

        handle.scroll_to(1000.0, 1500.0, Easing::CubicOut, |_| {});
        assert_eq!(first.get(), Some(ScrollOutcome::Interrupted));
        // The replacement starts where the first stopped
        fx.frame(1.0);
        assert!((fx.host.borrow().scroll_y() - at_switch).abs() < 10.0);
    }

    #[test]
    fn test_user_scroll_interrupts() {
        let mut fx = Fixture::new();
        let outcome = Rc::new(Cell::new(None));
        let slot = outcome.clone();
        fx.engine
            .handle()
            .scroll_to(3000.0, 1500.0, Easing::CubicOut, move |o| slot.set(Some(o)));
        fx.run(160.0);

        fx.scroll(100.0);
        assert_eq!(outcome.get(), Some(ScrollOutcome::Interrupted));
        assert!(!fx.engine.handle().is_scrolling());
    }

    #[test]
    fn test_handle_inert_after_engine_drop() {
        let fx = Fixture::new();
        let handle = fx.engine.handle();
        let Fixture {
            engine, observer, section, ..
        } = fx;
        drop(engine);

        assert!(!handle.is_alive());
        assert!(handle.create_timeline(Timeline::new()).is_none());
        let intent = Rc::new(RevealIntent::new(section, Preset::FadeRise));
        assert_eq!(
            handle.bind_scroll_trigger(&observer, &intent).unwrap_err(),
            AnimationError::EngineDropped
        );
    }

    #[test]
    fn test_springs_are_ticked() {
        let fx = Fixture::new();
        let handle = fx.engine.handle();
        let id = handle.register_spring(SpringConfig::indicator(), 0.0).unwrap();
        handle.set_spring_target(id, 120.0);
        for _ in 0..90 {
            fx.engine.tick(16.0);
        }
        assert!(handle.is_spring_settled(id));
        assert_eq!(handle.spring_value(id), Some(120.0));
    }
}
