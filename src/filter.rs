//! Category filtering and the mobile sidebar.
//! `MenuView` is bound once to a menu container and keeps the ids of the
//! elements it drives: filter buttons, category sections, the sidebar and the
//! page-level toggle and overlay. Events are dispatched to its methods.
//! Layout questions (width, element positions, scrolling) go through the
//! `Viewport` trait so the same logic runs in a browser binding or headless.

use crate::config::{Config, ScrollLayout};
use crate::dom::{Document, NodeId};
use crate::model::ALL_CATEGORIES;
use crate::render::{CATEGORY_ATTR, CATEGORY_CLASS, CONTENT_CLASS, FILTER_BUTTON_CLASS, SIDEBAR_CLASS};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
pub const OPEN_CLASS: &str = "open";
pub const TOGGLE_ID: &str = "sidebar-toggle";
pub const OVERLAY_ID: &str = "sidebar-overlay";

/// Lets filtered content settle before measuring where to scroll.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
    pub delay: Duration,
}

pub trait Viewport {
    fn width(&self) -> u32;
    fn scroll_y(&self) -> f64;
    /// Distance from the top of the viewport to `node`, if it is laid out.
    fn element_top(&self, node: NodeId) -> Option<f64>;
    fn scroll_to(&mut self, request: ScrollRequest);
    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click(NodeId),
    Resize { width: u32 },
}

#[derive(Debug, Clone)]
pub struct MenuView {
    container: NodeId,
    buttons: Vec<NodeId>,
    sections: Vec<NodeId>,
    content: Option<NodeId>,
    sidebar: Option<NodeId>,
    toggle: Option<NodeId>,
    overlay: Option<NodeId>,
    layout: ScrollLayout,
}

impl MenuView {
    /// Collects the elements under `container` (and the page-level sidebar
    /// toggle and overlay) that the view manages.
    pub fn bind(doc: &Document, container: NodeId, config: &Config) -> Self {
        let view = Self {
            container,
            buttons: doc.find_by_class(container, FILTER_BUTTON_CLASS),
            sections: doc.find_by_class(container, CATEGORY_CLASS),
            content: doc.first_by_class(container, CONTENT_CLASS),
            sidebar: doc.first_by_class(container, SIDEBAR_CLASS),
            toggle: doc.get_by_id(TOGGLE_ID),
            overlay: doc.get_by_id(OVERLAY_ID),
            layout: config.layout,
        };
        debug!(
            buttons = view.buttons.len(),
            sections = view.sections.len(),
            "menu view bound"
        );
        view
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// Routes a UI event to its handler. Returns whether the view handled it.
    pub fn handle(&self, doc: &mut Document, viewport: &mut dyn Viewport, event: UiEvent) -> bool {
        match event {
            UiEvent::Click(node) if self.buttons.contains(&node) => {
                self.click_filter(doc, viewport, node);
                true
            }
            UiEvent::Click(node) if Some(node) == self.toggle => {
                self.toggle_sidebar(doc, viewport);
                true
            }
            UiEvent::Click(node) if Some(node) == self.overlay => {
                self.close_sidebar(doc, viewport);
                true
            }
            UiEvent::Click(_) => false,
            UiEvent::Resize { width } => {
                self.resize(doc, viewport, width);
                true
            }
        }
    }

    /// Activates the filter button for `category`. Returns false when no
    /// button carries that category.
    pub fn select(&self, doc: &mut Document, viewport: &mut dyn Viewport, category: &str) -> bool {
        let button = self
            .buttons
            .iter()
            .copied()
            .find(|b| doc.attr(*b, CATEGORY_ATTR) == Some(category));
        match button {
            Some(button) => {
                self.click_filter(doc, viewport, button);
                true
            }
            None => false,
        }
    }

    /// Click handler for a filter button.
    pub fn click_filter(&self, doc: &mut Document, viewport: &mut dyn Viewport, button: NodeId) {
        let category = doc
            .attr(button, CATEGORY_ATTR)
            .unwrap_or(ALL_CATEGORIES)
            .to_string();

        for b in &self.buttons {
            doc.remove_class(*b, ACTIVE_CLASS);
        }
        doc.add_class(button, ACTIVE_CLASS);

        for section in &self.sections {
            let visible = category == ALL_CATEGORIES
                || doc.attr(*section, CATEGORY_ATTR) == Some(category.as_str());
            doc.set_class(*section, HIDDEN_CLASS, !visible);
        }
        debug!(%category, "filter applied");

        if self.is_sidebar_open(doc) {
            self.close_sidebar(doc, viewport);
        }

        if let Some(request) = self.scroll_target(doc, &*viewport, &category) {
            viewport.scroll_to(request);
        }
    }

    fn scroll_target(&self, doc: &Document, viewport: &dyn Viewport, category: &str) -> Option<ScrollRequest> {
        let offset = self.layout.scroll_offset(viewport.width());
        let top = if category == ALL_CATEGORIES {
            match self.content {
                Some(content) => viewport.element_top(content)? + viewport.scroll_y() - offset,
                None => 0.0,
            }
        } else {
            let section = self.sections.iter().copied().find(|s| {
                doc.attr(*s, CATEGORY_ATTR) == Some(category) && !doc.has_class(*s, HIDDEN_CLASS)
            })?;
            viewport.element_top(section)? + viewport.scroll_y() - offset
        };
        Some(ScrollRequest {
            top,
            smooth: true,
            delay: SCROLL_SETTLE_DELAY,
        })
    }

    pub fn is_sidebar_open(&self, doc: &Document) -> bool {
        self.sidebar
            .is_some_and(|sidebar| doc.has_class(sidebar, OPEN_CLASS))
    }

    pub fn open_sidebar(&self, doc: &mut Document, viewport: &mut dyn Viewport) {
        self.set_sidebar(doc, viewport, true);
    }

    pub fn close_sidebar(&self, doc: &mut Document, viewport: &mut dyn Viewport) {
        self.set_sidebar(doc, viewport, false);
    }

    pub fn toggle_sidebar(&self, doc: &mut Document, viewport: &mut dyn Viewport) {
        let open = !self.is_sidebar_open(doc);
        self.set_sidebar(doc, viewport, open);
    }

    fn set_sidebar(&self, doc: &mut Document, viewport: &mut dyn Viewport, open: bool) {
        let Some(sidebar) = self.sidebar else {
            return;
        };
        doc.set_class(sidebar, OPEN_CLASS, open);
        if let Some(overlay) = self.overlay {
            doc.set_class(overlay, ACTIVE_CLASS, open);
        }
        viewport.set_scroll_locked(open);
    }

    /// Resize handler: leaving the mobile layout forces the sidebar closed.
    pub fn resize(&self, doc: &mut Document, viewport: &mut dyn Viewport, width: u32) {
        if !self.layout.is_mobile(width) && self.is_sidebar_open(doc) {
            self.close_sidebar(doc, viewport);
        }
    }

    /// Category of the active filter button, if any.
    pub fn active_category<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        self.buttons
            .iter()
            .find(|b| doc.has_class(**b, ACTIVE_CLASS))
            .and_then(|b| doc.attr(*b, CATEGORY_ATTR))
    }
}

/// Viewport without a layout engine: fixed width, positions supplied by the
/// caller, and a record of what was requested.
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewport {
    pub width: u32,
    pub scroll_y: f64,
    pub tops: HashMap<NodeId, f64>,
    pub scrolls: Vec<ScrollRequest>,
    pub scroll_locked: bool,
}

impl HeadlessViewport {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

impl Viewport for HeadlessViewport {
    fn width(&self) -> u32 {
        self.width
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn element_top(&self, node: NodeId) -> Option<f64> {
        self.tops.get(&node).copied()
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        self.scrolls.push(request);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
