//! Navigation indicator
//!
//! The highlight under the active navigation link. It listens to the
//! [`ActiveSectionTracker`] and springs its offset and width to the bounds
//! of the active section's link element (`nav-<section id>`).

use crate::tracker::{ActiveSectionTracker, ListenerId};
use folio_animation::{EngineHandle, SpringConfig, SpringId};
use folio_core::document::{Bounds, SharedHost};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Scroll distance after which the navigation bar switches to its
/// condensed, backdrop-filled look
pub const NAV_SCROLLED_THRESHOLD: f32 = 80.0;

/// DOM id of the navigation link for a section
pub fn link_id(section_id: &str) -> String {
    format!("nav-{}", section_id)
}

/// Snapshot of the indicator
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationIndicatorState {
    pub active_section_id: String,
    pub indicator_offset_px: f32,
    pub indicator_width_px: f32,
}

struct IndicatorInner {
    engine: EngineHandle,
    host: SharedHost,
    offset: Option<SpringId>,
    width: Option<SpringId>,
    active: String,
    target: Option<Bounds>,
}

impl IndicatorInner {
    fn link_bounds(&self, section_id: &str) -> Option<Bounds> {
        let host = self.host.borrow();
        host.element_by_id(&link_id(section_id))
            .and_then(|link| host.element_bounds(link))
    }

    fn retarget(&mut self, section_id: &str) {
        self.active = section_id.to_string();
        let Some(bounds) = self.link_bounds(section_id) else {
            tracing::debug!(
                "NavigationIndicator: no link for '{}', keeping previous target",
                section_id
            );
            return;
        };
        self.target = Some(bounds);
        if let (Some(offset), Some(width)) = (self.offset, self.width) {
            self.engine.set_spring_target(offset, bounds.x);
            self.engine.set_spring_target(width, bounds.width);
        }
    }
}

/// Spring-animated active-link highlight
pub struct NavigationIndicator {
    inner: Rc<RefCell<IndicatorInner>>,
    tracker: ActiveSectionTracker,
    listener: ListenerId,
}

impl NavigationIndicator {
    pub fn new(engine: EngineHandle, host: SharedHost, tracker: &ActiveSectionTracker) -> Self {
        Self::with_config(engine, host, tracker, SpringConfig::indicator())
    }

    pub fn with_config(
        engine: EngineHandle,
        host: SharedHost,
        tracker: &ActiveSectionTracker,
        config: SpringConfig,
    ) -> Self {
        let active = tracker.active_section();
        let mut inner = IndicatorInner {
            engine: engine.clone(),
            host,
            offset: None,
            width: None,
            active: active.clone(),
            target: None,
        };
        // Start on the active link without animating
        inner.target = inner.link_bounds(&active);
        let start = inner.target.unwrap_or_default();
        inner.offset = engine.register_spring(config, start.x);
        inner.width = engine.register_spring(config, start.width);

        let inner = Rc::new(RefCell::new(inner));
        let weak: Weak<RefCell<IndicatorInner>> = Rc::downgrade(&inner);
        let listener = tracker.on_change(move |section_id| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().retarget(section_id);
            }
        });

        Self {
            inner,
            tracker: tracker.clone(),
            listener,
        }
    }

    pub fn active_section(&self) -> String {
        self.inner.borrow().active.clone()
    }

    /// Link bounds the springs are heading for
    pub fn target(&self) -> Option<Bounds> {
        self.inner.borrow().target
    }

    pub fn state(&self) -> NavigationIndicatorState {
        let inner = self.inner.borrow();
        let value = |id: Option<SpringId>| id.and_then(|id| inner.engine.spring_value(id)).unwrap_or(0.0);
        NavigationIndicatorState {
            active_section_id: inner.active.clone(),
            indicator_offset_px: value(inner.offset),
            indicator_width_px: value(inner.width),
        }
    }

    /// Whether both springs have come to rest
    pub fn is_settled(&self) -> bool {
        let inner = self.inner.borrow();
        [inner.offset, inner.width]
            .into_iter()
            .flatten()
            .all(|id| inner.engine.is_spring_settled(id))
    }
}

impl Drop for NavigationIndicator {
    fn drop(&mut self) {
        self.tracker.remove_listener(self.listener);
        let inner = self.inner.borrow();
        for id in [inner.offset, inner.width].into_iter().flatten() {
            inner.engine.remove_spring(id);
        }
    }
}

/// Whether the navigation bar shows its scrolled look at `scroll_y`
pub fn is_nav_scrolled(scroll_y: f32) -> bool {
    scroll_y > NAV_SCROLLED_THRESHOLD
}
