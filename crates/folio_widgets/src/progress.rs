//! Scroll progress bar
//!
//! A thin bar fixed to the top of the viewport whose fill tracks how much of
//! the page has been read. The bar slides in once after load, and the fill
//! glows while the page is being scrolled.

use folio_animation::{EngineHandle, Easing, Timeline, TimelineId};
use folio_core::document::{ElementId, ElementStyle, SharedHost, StyleTarget};
use folio_core::scroll::{ScrollObserver, ScrollSnapshot, Subscription};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// DOM id of the bar track
pub const PROGRESS_BAR_ID: &str = "scroll-progress";
/// DOM id of the bar fill
pub const PROGRESS_FILL_ID: &str = "scroll-progress-fill";

pub const ENTRANCE_DELAY_MS: f32 = 1000.0;
pub const ENTRANCE_DURATION_MS: f32 = 800.0;

/// Glow drops once scrolling pauses for this long
pub const GLOW_IDLE_MS: f64 = 150.0;
const GLOW_RISE_MS: f32 = 200.0;
const GLOW_FALL_MS: f32 = 500.0;

struct ProgressInner {
    host: SharedHost,
    fill: Option<ElementId>,
    progress: f32,
    last_scroll_y: Option<f32>,
    scrolled_since_tick: bool,
    last_activity_ms: Option<f64>,
    glow_target: f32,
    glow: f32,
    last_tick_ms: Option<f64>,
}

impl ProgressInner {
    fn on_scroll(&mut self, snapshot: &ScrollSnapshot) {
        self.progress = snapshot.state.progress;
        if let Some(previous) = self.last_scroll_y {
            if previous != snapshot.state.scroll_y {
                self.scrolled_since_tick = true;
            }
        }
        self.last_scroll_y = Some(snapshot.state.scroll_y);

        if let Some(fill) = self.fill {
            // Fill is scaled along x from its left edge
            self.host.borrow_mut().set_style(
                StyleTarget::element(fill),
                ElementStyle::IDENTITY.with_scale(self.progress),
            );
        }
    }
}

/// Subscribes to the observer and exposes the fill fraction
pub struct ScrollProgressIndicator {
    inner: Rc<RefCell<ProgressInner>>,
    engine: EngineHandle,
    entrance: Option<TimelineId>,
    _subscription: Subscription,
}

impl ScrollProgressIndicator {
    pub fn new(observer: &ScrollObserver, engine: EngineHandle) -> Self {
        let host = observer.host();
        let (bar, fill) = {
            let host = host.borrow();
            (
                host.element_by_id(PROGRESS_BAR_ID),
                host.element_by_id(PROGRESS_FILL_ID),
            )
        };

        let inner = Rc::new(RefCell::new(ProgressInner {
            host,
            fill,
            progress: 0.0,
            last_scroll_y: None,
            scrolled_since_tick: false,
            last_activity_ms: None,
            glow_target: 0.0,
            glow: 0.0,
            last_tick_ms: None,
        }));

        let weak: Weak<RefCell<ProgressInner>> = Rc::downgrade(&inner);
        let subscription = observer.subscribe(move |snapshot| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().on_scroll(snapshot);
            }
        });
        if observer.current().is_some() {
            inner.borrow_mut().on_scroll(&observer.snapshot());
        }

        let entrance = bar.and_then(|bar| {
            let mut timeline = Timeline::new();
            timeline.add_with_easing(
                StyleTarget::element(bar),
                ENTRANCE_DELAY_MS,
                ENTRANCE_DURATION_MS,
                ElementStyle::IDENTITY.with_scale(0.0),
                ElementStyle::IDENTITY,
                Easing::CubicOut,
            );
            timeline.play();
            engine.create_timeline(timeline)
        });
        if entrance.is_none() {
            tracing::debug!("ScrollProgressIndicator: no '{}' element, skipping entrance", PROGRESS_BAR_ID);
        }

        Self {
            inner,
            engine,
            entrance,
            _subscription: subscription,
        }
    }

    /// Normalized read fraction, `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    /// Fill width as a percentage of the track
    pub fn fill_percent(&self) -> f32 {
        self.progress() * 100.0
    }

    /// Current glow intensity, `0.0..=1.0`
    pub fn glow(&self) -> f32 {
        self.inner.borrow().glow
    }

    /// Whether the glow is heading on
    pub fn is_glowing(&self) -> bool {
        self.inner.borrow().glow_target > 0.0
    }

    /// Whether the load-time slide-in is still running
    pub fn is_entering(&self) -> bool {
        self.entrance
            .map(|id| self.engine.is_timeline_playing(id))
            .unwrap_or(false)
    }

    /// Per-frame glow update; call after the observer has dispatched
    pub fn tick(&self, now_ms: f64) {
        let mut inner = self.inner.borrow_mut();
        if std::mem::take(&mut inner.scrolled_since_tick) {
            inner.last_activity_ms = Some(now_ms);
            inner.glow_target = 1.0;
        } else if let Some(last) = inner.last_activity_ms {
            if now_ms - last >= GLOW_IDLE_MS {
                inner.glow_target = 0.0;
                inner.last_activity_ms = None;
            }
        }

        let dt = inner
            .last_tick_ms
            .map(|last| (now_ms - last).max(0.0) as f32)
            .unwrap_or(0.0);
        inner.last_tick_ms = Some(now_ms);

        let rate = if inner.glow_target > inner.glow {
            GLOW_RISE_MS
        } else {
            GLOW_FALL_MS
        };
        let step = dt / rate;
        inner.glow = if inner.glow_target > inner.glow {
            (inner.glow + step).min(inner.glow_target)
        } else {
            (inner.glow - step).max(inner.glow_target)
        };
    }
}

impl Drop for ScrollProgressIndicator {
    fn drop(&mut self) {
        if let Some(id) = self.entrance {
            self.engine.remove_timeline(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::AnimationEngine;
    use folio_core::document::{share, Bounds, DocumentHost, HeadlessDocument};

    struct Fixture {
        host: Rc<RefCell<HeadlessDocument>>,
        observer: ScrollObserver,
        engine: AnimationEngine,
        bar: ElementId,
        fill: ElementId,
    }

    fn fixture(document_height: f32) -> Fixture {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        doc.insert_section("home", 0.0, document_height);
        let bar = doc.insert_element(Some(PROGRESS_BAR_ID), Bounds::new(0.0, 0.0, 1280.0, 4.0));
        let fill = doc.insert_element(Some(PROGRESS_FILL_ID), Bounds::new(0.0, 0.0, 1280.0, 4.0));
        let host = share(doc);
        let observer = ScrollObserver::new(host.clone(), ["home"]);
        observer.mount();
        let engine = AnimationEngine::new(host.clone());
        Fixture {
            host,
            observer,
            engine,
            bar,
            fill,
        }
    }

    #[test]
    fn test_fill_tracks_progress() {
        let fx = fixture(5000.0);
        let bar = ScrollProgressIndicator::new(&fx.observer, fx.engine.handle());
        assert_eq!(bar.progress(), 0.0);

        fx.host.borrow_mut().set_scroll_y(2000.0);
        fx.observer.poll(16.0);
        assert_eq!(bar.progress(), 0.5);
        assert_eq!(bar.fill_percent(), 50.0);
        assert_eq!(
            fx.host.borrow().style(StyleTarget::element(fx.fill)).unwrap().scale,
            0.5
        );
    }

    #[test]
    fn test_non_scrolling_page_is_complete() {
        let fx = fixture(1000.0);
        let bar = ScrollProgressIndicator::new(&fx.observer, fx.engine.handle());
        assert_eq!(bar.progress(), 1.0);
    }

    #[test]
    fn test_entrance_slides_in_after_delay() {
        let fx = fixture(5000.0);
        let bar = ScrollProgressIndicator::new(&fx.observer, fx.engine.handle());
        assert!(bar.is_entering());

        for _ in 0..50 {
            fx.engine.tick(16.0);
            fx.engine.flush_styles();
        }
        // Still inside the delay
        let style = fx.host.borrow().style(StyleTarget::element(fx.bar)).unwrap();
        assert_eq!(style.scale, 0.0);

        for _ in 0..80 {
            fx.engine.tick(16.0);
            fx.engine.flush_styles();
        }
        assert!(!bar.is_entering());
        let style = fx.host.borrow().style(StyleTarget::element(fx.bar)).unwrap();
        assert_eq!(style.scale, 1.0);
    }

    #[test]
    fn test_glow_pulses_while_scrolling() {
        let fx = fixture(5000.0);
        let bar = ScrollProgressIndicator::new(&fx.observer, fx.engine.handle());
        bar.tick(0.0);

        let mut now = 0.0;
        for step in 1..=10 {
            now += 16.0;
            fx.host.borrow_mut().set_scroll_y(step as f32 * 40.0);
            fx.observer.poll(now);
            bar.tick(now);
        }
        assert!(bar.is_glowing());
        assert!(bar.glow() > 0.5);

        // Idle past the timeout
        for _ in 0..60 {
            now += 16.0;
            fx.observer.poll(now);
            bar.tick(now);
        }
        assert!(!bar.is_glowing());
        assert_eq!(bar.glow(), 0.0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let fx = fixture(5000.0);
        let bar = ScrollProgressIndicator::new(&fx.observer, fx.engine.handle());
        assert_eq!(fx.observer.subscriber_count(), 1);
        assert_eq!(fx.engine.timeline_count(), 1);
        drop(bar);
        assert_eq!(fx.observer.subscriber_count(), 0);
        assert_eq!(fx.engine.timeline_count(), 0);
    }
}
