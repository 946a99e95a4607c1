//! Shared widget record and the per-variant capability trait.
//!
//! Instead of a deep inheritance chain, every widget embeds a [`WidgetBase`]
//! for geometry, visibility and its touch key, and implements [`Widget`] for
//! whatever capabilities it actually has. Widgets are created by their owning
//! dialog and die with it; nothing here crosses the dialog tree.

use crate::geom::{Point, Rect};
use crate::keys::KeyButton;
use crate::render::Canvas;

/// Geometry, visibility and touch key common to every dialog object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBase {
    pub rect: Rect,
    pub key: KeyButton,
    pub visible: bool,
}

impl WidgetBase {
    pub fn new(rect: Rect, key: KeyButton) -> Self {
        Self {
            rect,
            key,
            visible: true,
        }
    }
}

/// Behavior of a dialog object. Paint is a pure function of current state and
/// geometry; drag handlers mutate state and report whether a repaint is due.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Emit draw primitives for the current state. Implementations must not
    /// mutate state here.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// A drag moved over this widget, position in 8× sub-pixel coordinates.
    /// Returns whether the widget's value changed.
    fn on_drag(&mut self, _p: Point) -> bool {
        false
    }

    /// First drag position after the start threshold.
    fn on_drag_start(&mut self, p: Point) -> bool {
        self.on_drag(p)
    }

    /// Final drag position on release.
    fn on_drag_end(&mut self, p: Point) -> bool {
        self.on_drag(p)
    }

    fn rect(&self) -> Rect {
        self.base().rect
    }

    fn key(&self) -> KeyButton {
        self.base().key
    }

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    /// Hit test in screen pixels.
    fn contains(&self, p: Point) -> bool {
        self.base().visible && self.base().rect.contains(p)
    }
}
