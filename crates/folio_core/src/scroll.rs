//! Viewport scroll observer
//!
//! The observer is the single source of truth for scroll state. It owns the
//! only read of the host's scroll position per frame and fans the resulting
//! [`ScrollSnapshot`] out to every subscriber, in registration order, so the
//! tracker, the progress bar and every reveal trigger see the same numbers
//! within one tick.
//!
//! Section geometry is measured on [`ScrollObserver::mount`] and after a
//! debounced resize, then cached. Subscribers read it from the snapshot.
//!
//! # Example
//!
//! ```rust
//! use folio_core::document::{share, DocumentHost, HeadlessDocument};
//! use folio_core::scroll::ScrollObserver;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut doc = HeadlessDocument::new(1280.0, 1000.0);
//! doc.insert_section("home", 0.0, 5000.0);
//! let host = share(doc);
//!
//! let observer = ScrollObserver::new(host.clone(), ["home"]);
//! let seen = Rc::new(Cell::new(0.0));
//! let seen_in_cb = seen.clone();
//! let _sub = observer.subscribe(move |snap| seen_in_cb.set(snap.state.progress));
//!
//! observer.mount();
//! host.borrow_mut().set_scroll_y(2000.0);
//! observer.poll(16.0);
//! assert_eq!(seen.get(), 0.5);
//! ```

use crate::document::{DocumentHost, SharedHost};
use crate::error::{CoreError, Result};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Scroll movement below this many pixels is not dispatched
pub const SCROLL_EPSILON: f32 = 0.5;

/// Default delay between the last resize and the section re-measure
pub const DEFAULT_RESIZE_DEBOUNCE_MS: f64 = 150.0;

/// Normalized scroll completion for the given metrics
///
/// Returns `scroll_y / (document_height - viewport_height)` clamped to
/// `[0, 1]`. A document that does not scroll is fully read (1.0).
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 1.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Scroll metrics for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f32,
    pub document_height: f32,
    pub viewport_height: f32,
    /// Normalized completion, `0.0..=1.0`
    pub progress: f32,
}

impl ScrollState {
    pub fn new(scroll_y: f32, document_height: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
            progress: scroll_progress(scroll_y, document_height, viewport_height),
        }
    }

    /// Read the current metrics from a host
    pub fn from_host(host: &dyn DocumentHost) -> Self {
        Self::new(
            host.scroll_y(),
            host.document_height(),
            host.viewport_height(),
        )
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    fn differs_from(&self, other: &ScrollState) -> bool {
        (self.scroll_y - other.scroll_y).abs() > SCROLL_EPSILON
            || self.document_height != other.document_height
            || self.viewport_height != other.viewport_height
    }
}

/// Vertical extent of a section in document coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f32,
    pub height: f32,
}

impl SectionBounds {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a document y coordinate falls within `[top, top + height)`
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// A navigable section with its cached geometry
#[derive(Clone, Debug, PartialEq)]
pub struct SectionDescriptor {
    pub id: String,
    pub bounds: SectionBounds,
}

/// What subscribers receive on every dispatch
#[derive(Clone, Debug)]
pub struct ScrollSnapshot {
    /// Dispatch sequence number, increasing by one per dispatch
    pub seq: u64,
    pub state: ScrollState,
    /// Sections that were found in the document, in document order
    pub sections: Rc<[SectionDescriptor]>,
}

impl ScrollSnapshot {
    pub fn section(&self, id: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Subscriber identifier, unique per observer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type ScrollCallback = Rc<RefCell<dyn FnMut(&ScrollSnapshot)>>;

struct ObserverInner {
    host: SharedHost,
    /// Configured section ids in document order
    section_ids: Vec<String>,
    sections: Rc<[SectionDescriptor]>,
    subscribers: IndexMap<SubscriberId, ScrollCallback>,
    next_subscriber: u64,
    last_state: Option<ScrollState>,
    /// Time at which a pending resize re-measure becomes due
    resize_due_at: Option<f64>,
    resize_debounce_ms: f64,
    seq: u64,
}

impl ObserverInner {
    fn measure_sections(&mut self) {
        let host = self.host.borrow();
        let measured: Vec<SectionDescriptor> = self
            .section_ids
            .iter()
            .filter_map(|id| {
                let Some(bounds) = host
                    .element_by_id(id)
                    .and_then(|element| host.element_bounds(element))
                else {
                    tracing::debug!("ScrollObserver: section '{}' not in document", id);
                    return None;
                };
                Some(SectionDescriptor {
                    id: id.clone(),
                    bounds: SectionBounds {
                        top: bounds.top(),
                        height: bounds.height,
                    },
                })
            })
            .collect();
        drop(host);
        self.sections = measured.into();
    }
}

/// Single scroll/resize listener shared by every dependent component
///
/// Cloning yields another handle to the same observer.
#[derive(Clone)]
pub struct ScrollObserver {
    inner: Rc<RefCell<ObserverInner>>,
}

impl ScrollObserver {
    /// Create an observer for the given sections (in document order)
    pub fn new<I, S>(host: SharedHost, section_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Rc::new(RefCell::new(ObserverInner {
                host,
                section_ids: section_ids.into_iter().map(Into::into).collect(),
                sections: Rc::from(Vec::new()),
                subscribers: IndexMap::new(),
                next_subscriber: 0,
                last_state: None,
                resize_due_at: None,
                resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
                seq: 0,
            })),
        }
    }

    /// Set the resize debounce interval
    pub fn set_resize_debounce(&self, ms: f64) {
        self.inner.borrow_mut().resize_debounce_ms = ms.max(0.0);
    }

    /// The host this observer reads from
    pub fn host(&self) -> SharedHost {
        self.inner.borrow().host.clone()
    }

    /// Configured section ids, in document order
    pub fn section_ids(&self) -> Vec<String> {
        self.inner.borrow().section_ids.clone()
    }

    /// Register a callback for scroll snapshots
    ///
    /// The callback runs on every dispatch until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ScrollSnapshot) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriberId(inner.next_subscriber);
        inner.next_subscriber += 1;
        inner
            .subscribers
            .insert(id, Rc::new(RefCell::new(callback)));

        Subscription {
            observer: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Cached bounds for a section
    ///
    /// Returns [`CoreError::SectionNotFound`] if the section had no element
    /// at the last measurement. Callers treat that as "inactive".
    pub fn section_bounds(&self, section_id: &str) -> Result<SectionBounds> {
        self.inner
            .borrow()
            .sections
            .iter()
            .find(|section| section.id == section_id)
            .map(|section| section.bounds)
            .ok_or_else(|| CoreError::SectionNotFound(section_id.to_string()))
    }

    /// Cached section descriptors, in document order
    pub fn sections(&self) -> Rc<[SectionDescriptor]> {
        self.inner.borrow().sections.clone()
    }

    /// Last dispatched scroll state
    pub fn current(&self) -> Option<ScrollState> {
        self.inner.borrow().last_state
    }

    /// Build a snapshot of the host's current metrics without dispatching
    pub fn snapshot(&self) -> ScrollSnapshot {
        let inner = self.inner.borrow();
        let state = ScrollState::from_host(&*inner.host.borrow());
        ScrollSnapshot {
            seq: inner.seq,
            state,
            sections: inner.sections.clone(),
        }
    }

    /// Measure every section and dispatch the initial snapshot
    pub fn mount(&self) {
        self.inner.borrow_mut().measure_sections();
        let state = {
            let inner = self.inner.borrow();
            let host = inner.host.borrow();
            ScrollState::from_host(&*host)
        };
        tracing::debug!(
            "ScrollObserver: mounted with {} sections (scroll_y={})",
            self.inner.borrow().sections.len(),
            state.scroll_y
        );
        self.dispatch(state);
    }

    /// Re-measure sections immediately (content mutation) and dispatch
    pub fn refresh_sections(&self) {
        self.inner.borrow_mut().measure_sections();
        let state = ScrollState::from_host(&*self.host().borrow());
        self.dispatch(state);
    }

    /// Record a resize; sections are re-measured once the debounce elapses
    pub fn notify_resize(&self, now_ms: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.resize_due_at = Some(now_ms + inner.resize_debounce_ms);
    }

    /// Per-frame check of the host scroll position
    ///
    /// Flushes a due resize, then dispatches if the scroll position moved by
    /// more than [`SCROLL_EPSILON`] or the viewport/document size changed.
    /// Returns `true` if a snapshot was dispatched.
    pub fn poll(&self, now_ms: f64) -> bool {
        let resized = {
            let mut inner = self.inner.borrow_mut();
            match inner.resize_due_at {
                Some(due) if now_ms >= due => {
                    inner.resize_due_at = None;
                    inner.measure_sections();
                    true
                }
                _ => false,
            }
        };

        let (state, changed) = {
            let inner = self.inner.borrow();
            let state = ScrollState::from_host(&*inner.host.borrow());
            let changed = match inner.last_state {
                None => true,
                Some(previous) => resized || state.differs_from(&previous),
            };
            (state, changed)
        };

        if changed {
            self.dispatch(state);
        }
        changed
    }

    fn dispatch(&self, state: ScrollState) {
        let (snapshot, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.seq += 1;
            inner.last_state = Some(state);
            let snapshot = ScrollSnapshot {
                seq: inner.seq,
                state,
                sections: inner.sections.clone(),
            };
            let callbacks: SmallVec<[(SubscriberId, ScrollCallback); 8]> = inner
                .subscribers
                .iter()
                .map(|(id, callback)| (*id, callback.clone()))
                .collect();
            (snapshot, callbacks)
        };

        for (id, callback) in callbacks {
            // Unsubscribed by an earlier callback in this dispatch
            if !self.inner.borrow().subscribers.contains_key(&id) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(&snapshot),
                Err(_) => {
                    tracing::warn!("ScrollObserver: skipping re-entrant dispatch to {:?}", id);
                }
            }
        }
    }
}

/// Live registration with a [`ScrollObserver`]
///
/// Dropping the subscription unregisters the callback.
pub struct Subscription {
    observer: Weak<RefCell<ObserverInner>>,
    id: Option<SubscriberId>,
}

impl Subscription {
    pub fn id(&self) -> Option<SubscriberId> {
        self.id
    }

    /// Unregister now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let (Some(id), Some(observer)) = (self.id.take(), self.observer.upgrade()) {
            observer.borrow_mut().subscribers.shift_remove(&id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{share, HeadlessDocument};
    use std::cell::Cell;

    fn six_sections() -> Rc<RefCell<HeadlessDocument>> {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        for (i, id) in ["home", "about", "skills", "education", "projects", "contact"]
            .iter()
            .enumerate()
        {
            doc.insert_section(id, i as f32 * 800.0, 800.0);
        }
        share(doc)
    }

    #[test]
    fn test_progress_formula() {
        assert_eq!(scroll_progress(2000.0, 5000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(0.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(4000.0, 5000.0, 1000.0), 1.0);
        // Clamped outside the range
        assert_eq!(scroll_progress(-10.0, 5000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(9000.0, 5000.0, 1000.0), 1.0);
        // Non-scrolling document is fully read
        assert_eq!(scroll_progress(0.0, 1000.0, 1000.0), 1.0);
    }

    #[test]
    fn test_progress_matches_ratio_for_all_positions() {
        let (doc, vp) = (5000.0f32, 1000.0f32);
        let mut y = 0.0f32;
        while y <= doc - vp {
            let expected = y / (doc - vp);
            assert!((scroll_progress(y, doc, vp) - expected).abs() < 1e-6);
            y += 37.0;
        }
    }

    #[test]
    fn test_section_bounds_and_not_found() {
        let host = six_sections();
        let observer = ScrollObserver::new(host, ["home", "about", "missing"]);
        observer.mount();

        let about = observer.section_bounds("about").unwrap();
        assert_eq!(about.top, 800.0);
        assert_eq!(about.height, 800.0);

        assert!(matches!(
            observer.section_bounds("missing"),
            Err(CoreError::SectionNotFound(id)) if id == "missing"
        ));
        assert_eq!(observer.sections().len(), 2);
    }

    #[test]
    fn test_epsilon_suppresses_tiny_moves() {
        let host = six_sections();
        let observer = ScrollObserver::new(host.clone(), ["home"]);
        let calls = Rc::new(Cell::new(0));
        let calls_cb = calls.clone();
        let _sub = observer.subscribe(move |_| calls_cb.set(calls_cb.get() + 1));

        observer.mount();
        assert_eq!(calls.get(), 1);

        host.borrow_mut().set_scroll_y(0.3);
        assert!(!observer.poll(16.0));
        assert_eq!(calls.get(), 1);

        // Accumulated movement past epsilon is delivered
        host.borrow_mut().set_scroll_y(0.6);
        assert!(observer.poll(32.0));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_subscribers_run_in_registration_order_with_same_snapshot() {
        let host = six_sections();
        let observer = ScrollObserver::new(host.clone(), ["home"]);
        let log = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|n| {
                let log = log.clone();
                observer.subscribe(move |snap| log.borrow_mut().push((n, snap.seq, snap.state.scroll_y)))
            })
            .collect();

        host.borrow_mut().set_scroll_y(1200.0);
        observer.poll(0.0);

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().map(|e| e.0).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(log.iter().all(|e| e.1 == log[0].1 && e.2 == 1200.0));
        drop(subs);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let host = six_sections();
        let observer = ScrollObserver::new(host, ["home"]);
        assert_eq!(observer.subscriber_count(), 0);

        let a = observer.subscribe(|_| {});
        let b = observer.subscribe(|_| {});
        assert_eq!(observer.subscriber_count(), 2);

        drop(a);
        assert_eq!(observer.subscriber_count(), 1);
        b.unsubscribe();
        assert_eq!(observer.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_skips_later_callback() {
        let host = six_sections();
        let observer = ScrollObserver::new(host, ["home"]);
        let victim_calls = Rc::new(Cell::new(0));

        let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = victim_slot.clone();
        let _killer = observer.subscribe(move |_| {
            slot.borrow_mut().take();
        });

        let calls = victim_calls.clone();
        *victim_slot.borrow_mut() = Some(observer.subscribe(move |_| calls.set(calls.get() + 1)));

        observer.mount();
        assert_eq!(victim_calls.get(), 0);
        assert_eq!(observer.subscriber_count(), 1);
    }

    #[test]
    fn test_resize_is_debounced() {
        let host = six_sections();
        let observer = ScrollObserver::new(host.clone(), ["home", "about"]);
        observer.mount();

        let about = host.borrow().element_by_id("about").unwrap();
        host.borrow_mut()
            .set_bounds(about, crate::document::Bounds::new(0.0, 900.0, 1280.0, 700.0));

        observer.notify_resize(1000.0);
        observer.poll(1100.0);
        assert_eq!(observer.section_bounds("about").unwrap().top, 800.0);

        // A second resize pushes the deadline out
        observer.notify_resize(1120.0);
        observer.poll(1200.0);
        assert_eq!(observer.section_bounds("about").unwrap().top, 800.0);

        assert!(observer.poll(1270.0));
        assert_eq!(observer.section_bounds("about").unwrap().top, 900.0);
    }
}
