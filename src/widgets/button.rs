//! Push button dialog object.

use crate::geom::Rect;
use crate::keys::KeyButton;
use crate::render::{Canvas, Color};
use crate::widgets::base::{Widget, WidgetBase};

const BORDER_WIDTH: i32 = 2;
const CORNER_RADIUS: i32 = 8;
/// Icon square edge in screen pixels when an image is set.
const ICON_EDGE_PX: i32 = 24;

/// A labeled, optionally icon-carrying touch button.
///
/// The button itself holds no pressed state; the pointer machine reports
/// clicks and auto-repeats through the owning dialog's touch map key.
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    text: String,
    image: Option<String>,
    background: Color,
    border_color: Color,
    text_color: Color,
}

impl Button {
    pub fn new(rect: Rect, key: KeyButton, text: &str) -> Self {
        Self {
            base: WidgetBase::new(rect, key),
            text: text.to_string(),
            image: None,
            background: Color::WHITE,
            border_color: Color::BLACK,
            text_color: Color::BLACK,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Show an icon on the left edge; an empty name removes it.
    pub fn set_image(&mut self, image: &str) {
        self.image = if image.is_empty() {
            None
        } else {
            Some(image.to_string())
        };
    }

    pub fn set_colors(&mut self, background: Color, border: Color, text: Color) {
        self.background = background;
        self.border_color = border;
        self.text_color = text;
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.base.visible {
            return;
        }
        let r8 = self.base.rect.to_subpixel();

        canvas.set_color(self.background);
        canvas.fill_rect(r8);
        canvas.set_color(self.border_color);
        canvas.rectangle(r8, CORNER_RADIUS, BORDER_WIDTH);

        let mut text_rect = r8;
        if let Some(image) = &self.image {
            let edge = ICON_EDGE_PX * 8;
            let icon_rect = Rect::new(r8.x, r8.y + (r8.height - edge) / 2, edge, edge);
            canvas.image(image, icon_rect);
            text_rect.x += edge;
            text_rect.width = (text_rect.width - edge).max(0);
        }
        if !self.text.is_empty() {
            canvas.set_color(self.text_color);
            canvas.text(&self.text, text_rect, false);
        }
    }
}
