//! Active-section tracking
//!
//! Decides which navigation section the reader is in. A probe line sits
//! `activation_offset` pixels below the viewport top; the first section in
//! document order whose span contains the probe is active. When no section
//! contains it (above the first section, in a gap, or past the end) the first
//! configured section is active, so there is always exactly one.

use folio_core::scroll::{ScrollObserver, ScrollSnapshot, SectionDescriptor, Subscription};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Probe distance below the viewport top
pub const DEFAULT_ACTIVATION_OFFSET: f32 = 100.0;

/// Active section for a scroll position
///
/// `sections` are the measured sections in document order; `configured` the
/// full configured id list, whose first entry is the fallback.
pub fn resolve_active<'a>(
    sections: &'a [SectionDescriptor],
    configured: &'a [String],
    scroll_y: f32,
    activation_offset: f32,
) -> Option<&'a str> {
    let probe = scroll_y + activation_offset;
    sections
        .iter()
        .find(|section| section.bounds.contains(probe))
        .map(|section| section.id.as_str())
        .or_else(|| configured.first().map(String::as_str))
}

/// Listener registration id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener = Rc<RefCell<dyn FnMut(&str)>>;

struct TrackerInner {
    section_ids: Vec<String>,
    activation_offset: f32,
    active: String,
    listeners: IndexMap<ListenerId, ChangeListener>,
    next_listener: u64,
    subscription: Option<Subscription>,
}

/// Subscribes to the scroll observer and publishes active-section changes
///
/// Cloning yields another handle to the same tracker. The observer
/// subscription ends when the last handle is dropped.
#[derive(Clone)]
pub struct ActiveSectionTracker {
    inner: Rc<RefCell<TrackerInner>>,
}

impl ActiveSectionTracker {
    pub fn new(observer: &ScrollObserver) -> Self {
        Self::with_offset(observer, DEFAULT_ACTIVATION_OFFSET)
    }

    pub fn with_offset(observer: &ScrollObserver, activation_offset: f32) -> Self {
        let section_ids = observer.section_ids();
        let active = section_ids.first().cloned().unwrap_or_default();
        let inner = Rc::new(RefCell::new(TrackerInner {
            section_ids,
            activation_offset,
            active,
            listeners: IndexMap::new(),
            next_listener: 0,
            subscription: None,
        }));

        let weak = Rc::downgrade(&inner);
        let subscription = observer.subscribe(move |snapshot| Self::on_scroll(&weak, snapshot));
        inner.borrow_mut().subscription = Some(subscription);

        let tracker = Self { inner };
        // Pick up the current position without waiting for a scroll
        if observer.current().is_some() {
            Self::on_scroll(&Rc::downgrade(&tracker.inner), &observer.snapshot());
        }
        tracker
    }

    fn on_scroll(inner: &Weak<RefCell<TrackerInner>>, snapshot: &ScrollSnapshot) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let (active, listeners) = {
            let mut guard = inner.borrow_mut();
            let next = match resolve_active(
                &snapshot.sections,
                &guard.section_ids,
                snapshot.state.scroll_y,
                guard.activation_offset,
            ) {
                Some(id) if id != guard.active => id.to_string(),
                _ => return,
            };
            tracing::debug!("ActiveSectionTracker: {} -> {}", guard.active, next);
            guard.active = next.clone();
            let listeners: SmallVec<[ChangeListener; 4]> = guard.listeners.values().cloned().collect();
            (next, listeners)
        };

        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(&active),
                Err(_) => tracing::warn!("ActiveSectionTracker: skipping re-entrant listener"),
            }
        }
    }

    /// Currently active section id
    pub fn active_section(&self) -> String {
        self.inner.borrow().active.clone()
    }

    pub fn activation_offset(&self) -> f32 {
        self.inner.borrow().activation_offset
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.inner.borrow().section_ids.clone()
    }

    /// Call `listener` with the new id each time the active section changes
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&str) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.insert(id, Rc::new(RefCell::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.shift_remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}
