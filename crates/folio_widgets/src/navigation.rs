//! Smooth in-page navigation
//!
//! Clicking a navigation link scrolls the page to the section instead of
//! jumping. The scroll is an eased tween run by the animation engine; the
//! caller gets a [`Navigation`] future that resolves when the tween ends.
//!
//! Only one navigation runs at a time. A new request stops the running
//! tween where it is and starts from that position, and the earlier future
//! resolves [`NavigationOutcome::Interrupted`]. Scrolling by hand interrupts
//! as well.
//!
//! # Example
//!
//! ```rust,ignore
//! let nav = navigator.navigate_to("contact", DEFAULT_NAV_OFFSET_PX);
//! while !nav.is_finished() {
//!     page.frame(16.0);
//! }
//! assert_eq!(pollster::block_on(nav), NavigationOutcome::Completed);
//! ```

use folio_animation::{EngineHandle, Easing, ScrollOutcome};
use folio_core::scroll::ScrollObserver;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Length of a navigation scroll
pub const NAVIGATION_DURATION_MS: f32 = 1500.0;

/// Room left above the section for the fixed navigation bar
pub const DEFAULT_NAV_OFFSET_PX: f32 = 80.0;

/// Anchor fragment for a section
pub fn fragment_for(section_id: &str) -> String {
    format!("#{}", section_id)
}

/// Section id named by an anchor fragment (`"#about"` or `"about"`)
pub fn section_from_fragment(fragment: &str) -> Option<&str> {
    let id = fragment.trim().trim_start_matches('#');
    (!id.is_empty()).then_some(id)
}

/// How a navigation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Scrolled all the way to the section
    Completed,
    /// Stopped by a newer navigation or by user scroll
    Interrupted,
    /// Nothing to do: unknown section or no engine
    Skipped,
}

impl From<ScrollOutcome> for NavigationOutcome {
    fn from(outcome: ScrollOutcome) -> Self {
        match outcome {
            ScrollOutcome::Completed => NavigationOutcome::Completed,
            ScrollOutcome::Interrupted => NavigationOutcome::Interrupted,
        }
    }
}

#[derive(Default)]
struct NavigationSlot {
    outcome: Option<NavigationOutcome>,
    waker: Option<Waker>,
}

fn resolve(slot: &RefCell<NavigationSlot>, outcome: NavigationOutcome) {
    let waker = {
        let mut slot = slot.borrow_mut();
        if slot.outcome.is_some() {
            return;
        }
        slot.outcome = Some(outcome);
        slot.waker.take()
    };
    if let Some(waker) = waker {
        waker.wake();
    }
}

/// Pending navigation; resolves to its [`NavigationOutcome`]
///
/// The future makes progress only while the page's frame loop runs.
#[must_use = "a navigation does nothing observable unless its outcome is checked"]
pub struct Navigation {
    slot: Rc<RefCell<NavigationSlot>>,
}

impl Navigation {
    fn pending() -> Self {
        Self {
            slot: Rc::new(RefCell::new(NavigationSlot::default())),
        }
    }

    fn resolved(outcome: NavigationOutcome) -> Self {
        let navigation = Self::pending();
        navigation.slot.borrow_mut().outcome = Some(outcome);
        navigation
    }

    /// Outcome, if already decided
    pub fn outcome(&self) -> Option<NavigationOutcome> {
        self.slot.borrow().outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for Navigation {
    type Output = NavigationOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation")
            .field("outcome", &self.outcome())
            .finish()
    }
}

/// Scrolls the page to sections through the engine's scroll-to tween
pub struct SmoothNavigator {
    engine: EngineHandle,
    observer: ScrollObserver,
    duration_ms: f32,
    easing: Easing,
    menu_open: Cell<bool>,
}

impl SmoothNavigator {
    pub fn new(engine: EngineHandle, observer: ScrollObserver) -> Self {
        Self {
            engine,
            observer,
            duration_ms: NAVIGATION_DURATION_MS,
            easing: Easing::CubicOut,
            menu_open: Cell::new(false),
        }
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Scroll so the section's top sits `offset_px` below the viewport top
    ///
    /// Unknown sections resolve [`NavigationOutcome::Skipped`] immediately.
    /// Navigating closes the mobile menu.
    pub fn navigate_to(&self, section_id: &str, offset_px: f32) -> Navigation {
        self.menu_open.set(false);

        let bounds = match self.observer.section_bounds(section_id) {
            Ok(bounds) => bounds,
            Err(err) => {
                tracing::debug!("SmoothNavigator: {}", err);
                return Navigation::resolved(NavigationOutcome::Skipped);
            }
        };

        let navigation = Navigation::pending();
        let slot = navigation.slot.clone();
        let started = self.engine.scroll_to(
            bounds.top - offset_px,
            self.duration_ms,
            self.easing,
            move |outcome| resolve(&slot, outcome.into()),
        );

        match started {
            Some(_) => {
                tracing::debug!("SmoothNavigator: heading to '{}'", section_id);
                navigation
            }
            None => {
                tracing::warn!("SmoothNavigator: animation engine is gone");
                Navigation::resolved(NavigationOutcome::Skipped)
            }
        }
    }

    /// Navigate to the section named by an anchor fragment
    pub fn navigate_to_fragment(&self, fragment: &str, offset_px: f32) -> Navigation {
        match section_from_fragment(fragment) {
            Some(section_id) => self.navigate_to(section_id, offset_px),
            None => Navigation::resolved(NavigationOutcome::Skipped),
        }
    }

    /// Stop the navigation in flight
    pub fn cancel(&self) -> bool {
        self.engine.cancel_scroll()
    }

    pub fn is_navigating(&self) -> bool {
        self.engine.is_scrolling()
    }

    pub fn toggle_menu(&self) -> bool {
        let open = !self.menu_open.get();
        self.menu_open.set(open);
        open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }
}
