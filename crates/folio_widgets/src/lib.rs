//! Folio Widgets
//!
//! Page components built on the scroll observer and the animation engine.
//!
//! - **SectionReveal**: binds a section's reveal intent to its scroll trigger
//! - **ActiveSectionTracker**: which section sits under the activation probe
//! - **NavigationIndicator**: spring-driven highlight under the active link
//! - **ScrollProgressIndicator**: read-progress bar with entrance and glow
//! - **SmoothNavigator**: eased, interruptible scroll to a section
//! - **Page**: composition root that mounts all of the above
//!
//! # Example
//!
//! ```ignore
//! use folio_widgets::{Page, PageConfig};
//!
//! let mut page = Page::build(PageConfig::default())?;
//! let nav = page.navigate("projects");
//! page.run_until_finished(&nav, 16.0, 5000.0);
//! assert_eq!(page.active_section(), "projects");
//! ```

pub mod error;
pub mod indicator;
pub mod navigation;
pub mod page;
pub mod progress;
pub mod reveal;
pub mod tracker;

pub use error::{Result, WidgetError};
pub use indicator::{is_nav_scrolled, link_id, NavigationIndicator, NavigationIndicatorState};
pub use navigation::{
    fragment_for, section_from_fragment, Navigation, NavigationOutcome, SmoothNavigator,
};
pub use page::{item_id, title_id, Page, PageConfig, SectionLayout};
pub use progress::ScrollProgressIndicator;
pub use reveal::{ScrubRangeConfig, SectionReveal, SectionRevealConfig};
pub use tracker::{resolve_active, ActiveSectionTracker, ListenerId};
