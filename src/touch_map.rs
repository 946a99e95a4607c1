//! Touch-area to keybutton lookup grid.
//!
//! Primitive but effective: dialogs register a [`KeyButton`] per screen
//! rectangle and the pointer machine asks which button a press landed on.
//! Every anomaly degrades to a safe value. Out-of-bounds lookups return
//! [`KeyButton::NONE`], fills clip to the grid, nothing here can fail.

use crate::geom::{Point, Rect, Size};
use crate::keys::KeyButton;

/// Per-pixel keybutton map sized to the display.
#[derive(Debug, Default)]
pub struct TouchMap {
    size: Size,
    cells: Vec<KeyButton>,
}

impl TouchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocate the grid for a new display size. Previous contents are
    /// discarded; every cell starts as [`KeyButton::NONE`].
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size.area(), KeyButton::NONE);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Reset every cell to [`KeyButton::NONE`].
    pub fn clear(&mut self) {
        self.set_key(
            Rect::new(0, 0, self.size.width, self.size.height),
            KeyButton::NONE,
        );
    }

    /// Fill `rect` (clipped to the grid) with `key`. A [`KeyButton::NO_CHANGE`]
    /// fill leaves the region untouched.
    pub fn set_key(&mut self, rect: Rect, key: KeyButton) {
        if key == KeyButton::NO_CHANGE {
            return;
        }
        let left = rect.left().max(0);
        let right = rect.right().min(self.size.width);
        let top = rect.top().max(0);
        let bottom = rect.bottom().min(self.size.height);

        for y in top..bottom {
            let row = (self.size.width * y) as usize;
            for x in left..right {
                self.cells[row + x as usize] = key;
            }
        }
    }

    /// Button registered at `p`, or [`KeyButton::NONE`] outside the grid.
    pub fn key_at(&self, p: Point) -> KeyButton {
        if !self.size.contains(p) {
            return KeyButton::NONE;
        }
        self.cells[(self.size.width * p.y + p.x) as usize]
    }
}
