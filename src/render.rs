//! Render boundary: widgets emit draw primitives, something else owns pixels.
//!
//! All coordinates crossing this boundary are 8× sub-pixel integers (see
//! [`crate::geom::SUBPIXEL_SCALE`]); the graphics collaborator divides back
//! down with whatever rounding its output device wants. Fonts and image
//! assets are resolved on the far side, widgets only name them.

use crate::geom::{Point, Rect};

/// An RGB color. The toolkit never blends; alpha belongs to the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Sink for widget paint output. Positions and sizes are 8× sub-pixel.
pub trait Canvas {
    /// Set the color used by subsequent rectangle/line calls.
    fn set_color(&mut self, color: Color);

    /// Solid fill.
    fn fill_rect(&mut self, rect: Rect);

    /// Outlined rectangle with rounded corners.
    fn rectangle(&mut self, rect: Rect, corner_radius: i32, border_width: i32);

    fn line(&mut self, from: Point, to: Point);

    /// Blit a named image asset scaled into `rect`.
    fn image(&mut self, name: &str, rect: Rect);

    /// Lay text out inside `rect`. `rotated` asks for 90° rotated glyphs.
    fn text(&mut self, text: &str, rect: Rect, rotated: bool);
}

/// One recorded [`Canvas`] call, for tests and draw-stream replay.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Color(Color),
    FillRect(Rect),
    Rectangle {
        rect: Rect,
        corner_radius: i32,
        border_width: i32,
    },
    Line {
        from: Point,
        to: Point,
    },
    Image {
        name: String,
        rect: Rect,
    },
    Text {
        text: String,
        rect: Rect,
        rotated: bool,
    },
}

/// A [`Canvas`] that records every call instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.ops.push(DrawOp::Color(color));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect(rect));
    }

    fn rectangle(&mut self, rect: Rect, corner_radius: i32, border_width: i32) {
        self.ops.push(DrawOp::Rectangle {
            rect,
            corner_radius,
            border_width,
        });
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ops.push(DrawOp::Line { from, to });
    }

    fn image(&mut self, name: &str, rect: Rect) {
        self.ops.push(DrawOp::Image {
            name: name.to_string(),
            rect,
        });
    }

    fn text(&mut self, text: &str, rect: Rect, rotated: bool) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            rect,
            rotated,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_color(Color::BLACK);
        canvas.line(Point::new(0, 0), Point::new(8, 8));
        canvas.image("thumb", Rect::new(0, 0, 48, 48));

        assert_eq!(canvas.ops.len(), 3);
        assert_eq!(canvas.ops[0], DrawOp::Color(Color::BLACK));
        assert!(matches!(canvas.ops[2], DrawOp::Image { ref name, .. } if name == "thumb"));
    }
}
