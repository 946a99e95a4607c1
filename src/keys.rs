//! Key/button identifiers and modifier flags delivered by the touch layer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Identifier of a touchable button or key.
///
/// The application defines its own code space; the toolkit only reserves the
/// two sentinels. [`KeyButton::NONE`] marks "no button here" and is what
/// out-of-bounds touch-map lookups return. [`KeyButton::NO_CHANGE`] is only
/// meaningful as a fill value: writing it to the touch map leaves the covered
/// region untouched, so overlapping registrations can skip holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyButton(pub u16);

impl KeyButton {
    pub const NONE: KeyButton = KeyButton(0);
    pub const NO_CHANGE: KeyButton = KeyButton(u16::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for KeyButton {
    fn default() -> Self {
        KeyButton::NONE
    }
}

bitflags! {
    /// Keyboard modifier state attached to key events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyMods: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const GUI   = 0b1000;
    }
}
