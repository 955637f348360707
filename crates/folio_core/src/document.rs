//! Document host abstraction
//!
//! The scroll observer, animation engine and navigation widgets never touch a
//! real DOM. They talk to a [`DocumentHost`], which reports the scroll
//! position, viewport metrics and element geometry, and receives the styles
//! computed by running animations.
//!
//! [`HeadlessDocument`] is the in-memory implementation used by the CLI and
//! by tests. A browser binding would implement the same trait on top of
//! `web-sys`.
//!
//! # Example
//!
//! ```rust
//! use folio_core::document::{DocumentHost, HeadlessDocument};
//!
//! let mut doc = HeadlessDocument::new(1280.0, 1000.0);
//! let about = doc.insert_section("about", 0.0, 800.0);
//! doc.set_scroll_y(400.0);
//!
//! assert_eq!(doc.element_by_id("about"), Some(about));
//! // Document is only as tall as its content; scroll is clamped
//! assert_eq!(doc.scroll_y(), 0.0);
//! ```

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::Rc;

new_key_type! {
    /// Handle to an element in the document
    pub struct ElementId;
}

/// Absolute element geometry in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge (document y)
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge (document y)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a document y coordinate falls within `[top, bottom)`
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top() && y < self.bottom()
    }
}

/// Animatable presentation properties of a single target
///
/// Mirrors the subset of CSS transform/opacity the presets drive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementStyle {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    /// Rotation around the X axis in degrees (glyph flip)
    pub rotate_x: f32,
}

impl ElementStyle {
    /// Fully visible, untransformed
    pub const IDENTITY: ElementStyle = ElementStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = degrees;
        self
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What an animation writes to: a whole element, or one glyph of its text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleTarget {
    pub element: ElementId,
    pub glyph: Option<u32>,
}

impl StyleTarget {
    pub fn element(element: ElementId) -> Self {
        Self {
            element,
            glyph: None,
        }
    }

    pub fn glyph(element: ElementId, index: u32) -> Self {
        Self {
            element,
            glyph: Some(index),
        }
    }
}

/// Platform capability the runtime reads scroll/geometry from
///
/// Implementations are shared as [`SharedHost`] on the UI thread. All
/// methods are synchronous; reads always observe the latest written value.
pub trait DocumentHost {
    /// Current vertical scroll offset
    fn scroll_y(&self) -> f32;

    /// Write the scroll offset, clamped to the scrollable range
    fn set_scroll_y(&mut self, y: f32);

    /// Height of the visible viewport
    fn viewport_height(&self) -> f32;

    /// Total height of the document content
    fn document_height(&self) -> f32;

    /// Look up an element by its DOM id
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Geometry of a live element; `None` once the element is removed
    fn element_bounds(&self, element: ElementId) -> Option<Bounds>;

    /// Text content of an element, if it has any
    fn element_text(&self, element: ElementId) -> Option<String>;

    /// Apply a computed style to an element or glyph
    fn set_style(&mut self, target: StyleTarget, style: ElementStyle);

    /// Whether the element is still attached
    fn is_attached(&self, element: ElementId) -> bool {
        self.element_bounds(element).is_some()
    }

    /// Largest reachable scroll offset
    fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport_height()).max(0.0)
    }
}

/// Shared, single-threaded host handle
pub type SharedHost = Rc<RefCell<dyn DocumentHost>>;

/// Wrap a host implementation for sharing
pub fn share<H: DocumentHost + 'static>(host: H) -> Rc<RefCell<H>> {
    Rc::new(RefCell::new(host))
}

// ============================================================================
// Headless implementation
// ============================================================================

#[derive(Clone, Debug)]
struct ElementNode {
    dom_id: Option<String>,
    bounds: Bounds,
    text: Option<String>,
}

/// In-memory document used for simulation and tests
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    elements: SlotMap<ElementId, ElementNode>,
    by_id: FxHashMap<String, ElementId>,
    styles: FxHashMap<StyleTarget, ElementStyle>,
    scroll_y: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl HeadlessDocument {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Default::default()
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Resize the viewport; the scroll offset is re-clamped
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        let y = self.scroll_y;
        self.set_scroll_y(y);
    }

    /// Insert an element with the given geometry
    pub fn insert_element(&mut self, dom_id: Option<&str>, bounds: Bounds) -> ElementId {
        let id = self.elements.insert(ElementNode {
            dom_id: dom_id.map(str::to_string),
            bounds,
            text: None,
        });
        if let Some(dom_id) = dom_id {
            self.by_id.insert(dom_id.to_string(), id);
        }
        id
    }

    /// Insert a full-width section with a DOM id
    pub fn insert_section(&mut self, dom_id: &str, top: f32, height: f32) -> ElementId {
        let width = self.viewport_width;
        self.insert_element(Some(dom_id), Bounds::new(0.0, top, width, height))
    }

    /// Insert an element carrying text content
    pub fn insert_text(&mut self, dom_id: Option<&str>, bounds: Bounds, text: &str) -> ElementId {
        let id = self.insert_element(dom_id, bounds);
        if let Some(node) = self.elements.get_mut(id) {
            node.text = Some(text.to_string());
        }
        id
    }

    /// Detach an element; later lookups report it missing
    pub fn remove_element(&mut self, element: ElementId) -> bool {
        let Some(node) = self.elements.remove(element) else {
            return false;
        };
        if let Some(dom_id) = node.dom_id {
            self.by_id.remove(&dom_id);
        }
        self.styles.retain(|target, _| target.element != element);
        true
    }

    /// Move or resize an existing element
    pub fn set_bounds(&mut self, element: ElementId, bounds: Bounds) {
        if let Some(node) = self.elements.get_mut(element) {
            node.bounds = bounds;
        }
    }

    /// Last style written for a target
    pub fn style(&self, target: StyleTarget) -> Option<ElementStyle> {
        self.styles.get(&target).copied()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl DocumentHost for HeadlessDocument {
    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn set_scroll_y(&mut self, y: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn document_height(&self) -> f32 {
        // Content extent, never shorter than the viewport
        self.elements
            .values()
            .map(|node| node.bounds.bottom())
            .fold(self.viewport_height, f32::max)
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.by_id.get(id).copied()
    }

    fn element_bounds(&self, element: ElementId) -> Option<Bounds> {
        self.elements.get(element).map(|node| node.bounds)
    }

    fn element_text(&self, element: ElementId) -> Option<String> {
        self.elements.get(element).and_then(|node| node.text.clone())
    }

    fn set_style(&mut self, target: StyleTarget, style: ElementStyle) {
        if self.elements.contains_key(target.element) {
            self.styles.insert(target, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_height_tracks_content() {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        assert_eq!(doc.document_height(), 1000.0);

        doc.insert_section("home", 0.0, 800.0);
        doc.insert_section("about", 800.0, 1200.0);
        assert_eq!(doc.document_height(), 2000.0);
        assert_eq!(doc.max_scroll(), 1000.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        doc.insert_section("home", 0.0, 3000.0);

        doc.set_scroll_y(-50.0);
        assert_eq!(doc.scroll_y(), 0.0);

        doc.set_scroll_y(5000.0);
        assert_eq!(doc.scroll_y(), 2000.0);
    }

    #[test]
    fn test_removed_element_is_detached() {
        let mut doc = HeadlessDocument::new(1280.0, 1000.0);
        let el = doc.insert_section("skills", 0.0, 500.0);
        doc.set_style(StyleTarget::element(el), ElementStyle::IDENTITY.with_opacity(0.0));
        assert!(doc.is_attached(el));

        assert!(doc.remove_element(el));
        assert!(!doc.is_attached(el));
        assert_eq!(doc.element_by_id("skills"), None);
        assert_eq!(doc.style(StyleTarget::element(el)), None);

        // Styles for detached elements are ignored
        doc.set_style(StyleTarget::element(el), ElementStyle::IDENTITY);
        assert_eq!(doc.style(StyleTarget::element(el)), None);
    }

    #[test]
    fn test_shrinking_viewport_reclamps_scroll() {
        let mut doc = HeadlessDocument::new(1280.0, 500.0);
        doc.insert_section("home", 0.0, 1500.0);
        doc.set_scroll_y(1000.0);
        assert_eq!(doc.scroll_y(), 1000.0);

        doc.set_viewport(1280.0, 1000.0);
        assert_eq!(doc.scroll_y(), 500.0);
    }
}
