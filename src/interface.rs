//! The dialog interface contract between the event pump and the application.
//!
//! The pump never assumes a concrete dialog implementation. It classifies
//! input with the hit-test queries below and routes semantic events through
//! [`EventInterface::on_event`] and the drag lifecycle callbacks. Exactly one
//! implementer is active at a time; swapping it is an explicit registration
//! on the pump, serialized against classification.

use std::sync::{Arc, Mutex};

use crate::event::Event;
use crate::geom::Point;
use crate::keys::KeyButton;
use crate::lock::lock_or_recover;

/// Opaque handle for a dialog object inside the active interface. The pump
/// only carries it between hit test and drag callbacks; the interface owns
/// the mapping to real widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// What an interface did with a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event handled, stop routing.
    Processed,
    /// Event not handled here.
    Open,
    /// Event may be broadcast further by the application.
    General,
    /// The dialog asks to close.
    Exit,
}

/// Capability set any dialog container must implement to receive input.
///
/// Hit-test queries run on the pump worker while classification is in
/// progress; event callbacks run on whichever thread calls
/// [`crate::pump::EventPump::poll_event`]. Implementations therefore use
/// interior mutability for their dialog state.
pub trait EventInterface: Send + Sync {
    /// Stable name for logs.
    fn name(&self) -> &str;

    /// A classified event routed to this interface.
    fn on_event(&self, event: &Event) -> EventOutcome;

    /// A drag crossed the start threshold. `object` is `None` for
    /// whole-dialog drags.
    fn on_start_drag(&self, object: Option<ObjectId>);

    /// The current drag ended or was cancelled.
    fn on_stop_drag(&self);

    /// Dialog object at `p`, if any.
    fn find_object(&self, p: Point) -> Option<ObjectId>;

    /// Button key at `p`, or [`KeyButton::NONE`].
    fn find_button(&self, p: Point) -> KeyButton;

    /// Whether `p` lies in a swype (scrollable) dialog.
    fn is_swype_dialog(&self, p: Point) -> bool;

    /// Whether the swype dialog at `p` also allows dragging its objects or
    /// itself out of the scroll plane.
    fn is_scroll_drag_dialog(&self, p: Point) -> bool;

    /// Whether the swype dialog at `p` scrolls along the horizontal axis.
    fn is_horizontal_scroll_dialog(&self, p: Point) -> bool;

    fn on_mouse_wheel(&self, up: bool, down: bool);

    /// Scroll the dialog under `start` by `distance`.
    fn scroll_dialog(&self, start: Point, distance: Point);

    /// Move a dragged object (or the whole dialog for `None`) to `to`,
    /// in screen pixels.
    fn drag_object(&self, object: Option<ObjectId>, to: Point);
}

/// Holder of the single active interface, shared between the pump worker and
/// registration calls.
#[derive(Default)]
pub(crate) struct InterfaceRegistry {
    active: Mutex<Option<Arc<dyn EventInterface>>>,
}

impl InterfaceRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the active interface. Returns `None` when nothing is
    /// registered, which classification treats as "no capabilities".
    pub(crate) fn with_active<R>(&self, f: impl FnOnce(&dyn EventInterface) -> R) -> Option<R> {
        let guard = lock_or_recover(&self.active, "InterfaceRegistry::with_active");
        guard.as_ref().map(|interface| f(interface.as_ref()))
    }

    /// Swap the active interface, returning the previous one. Holding the
    /// registry lock for the swap is what keeps registration atomic with
    /// respect to in-flight classification.
    pub(crate) fn swap(
        &self,
        interface: Option<Arc<dyn EventInterface>>,
    ) -> Option<Arc<dyn EventInterface>> {
        let mut guard = lock_or_recover(&self.active, "InterfaceRegistry::swap");
        std::mem::replace(&mut *guard, interface)
    }

    pub(crate) fn active(&self) -> Option<Arc<dyn EventInterface>> {
        lock_or_recover(&self.active, "InterfaceRegistry::active").clone()
    }
}
