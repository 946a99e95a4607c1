//! Semantic events: what the classifier emits and dialogs consume.
//!
//! Raw platform input (see [`crate::input`]) never reaches a dialog directly.
//! The pointer machine classifies it into one of these application-level
//! events, which are immutable once constructed and copied by value into the
//! event queue.

use crate::geom::Point;
use crate::interface::ObjectId;
use crate::keys::{KeyButton, KeyMods};

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    /// Real user input.
    User,
    /// Synthetic input injected by fuzz testing.
    Test,
}

/// Result of a [`crate::pump::EventPump::poll_event`] call, so render loops can
/// tell real input from injected test events without special-casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Nothing queued.
    Empty,
    /// A user event was dispatched.
    User,
    /// A fuzz-injected event was dispatched.
    Testing,
}

/// The classified event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Finger or mouse button went down.
    TouchPress(Point),
    /// Finger or mouse button came up.
    TouchRelease(Point),
    /// Pointer moved while nothing is pressed.
    TouchMove(Point),
    /// Pointer moved while pressed without entering a drag.
    MouseMove(Point),
    /// Key (or auto-repeated button) press.
    KeyPress { key: KeyButton, mods: KeyMods },
    KeyRelease,
    /// Short press-and-release on one spot.
    MouseClick { key: KeyButton, at: Point },
    /// A drag crossed the start threshold. `object` is the dialog object under
    /// the press point, or `None` when the dialog itself is being dragged.
    DragStart {
        object: Option<ObjectId>,
        from: Point,
    },
    DragMove {
        object: Option<ObjectId>,
        to: Point,
    },
    DragStop { at: Point },
    /// Scroll movement inside a swype dialog.
    Scroll { start: Point, delta: Point },
    /// Mouse wheel rotation. `up == false` means down.
    Wheel { up: bool },
    MouseFocus { gained: bool },
    InputFocus { gained: bool },
    Minimized,
    Restored,
    Quit,
}

impl EventKind {
    /// Drag-family events become stale when the active interface changes and
    /// are purged from the queue at that point.
    pub(crate) fn is_drag(&self) -> bool {
        matches!(
            self,
            EventKind::DragStart { .. } | EventKind::DragMove { .. } | EventKind::DragStop { .. }
        )
    }
}

/// A classified event plus its origin tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub origin: EventOrigin,
}

impl Event {
    pub fn user(kind: EventKind) -> Self {
        Self {
            kind,
            origin: EventOrigin::User,
        }
    }

    pub fn test(kind: EventKind) -> Self {
        Self {
            kind,
            origin: EventOrigin::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_family_covers_exactly_the_three_drag_kinds() {
        assert!(EventKind::DragStart {
            object: None,
            from: Point::new(0, 0)
        }
        .is_drag());
        assert!(EventKind::DragMove {
            object: None,
            to: Point::new(0, 0)
        }
        .is_drag());
        assert!(EventKind::DragStop {
            at: Point::new(0, 0)
        }
        .is_drag());
        assert!(!EventKind::Scroll {
            start: Point::new(0, 0),
            delta: Point::new(0, 1)
        }
        .is_drag());
        assert!(!EventKind::TouchPress(Point::new(0, 0)).is_drag());
    }

    #[test]
    fn origin_constructors_tag_events() {
        assert_eq!(Event::user(EventKind::Quit).origin, EventOrigin::User);
        assert_eq!(Event::test(EventKind::Quit).origin, EventOrigin::Test);
    }
}
