//! Vertical bar graph dialog object, one or two values per slot.

use crate::geom::Rect;
use crate::keys::KeyButton;
use crate::render::{Canvas, Color};
use crate::widgets::base::{Widget, WidgetBase};

/// Height (screen pixels) of the caption strip under the bars.
const TEXT_STRIP_PX: i32 = 12;

/// Palette cycled over bars that never got an explicit color.
pub const DEFAULT_BAR_COLORS: [Color; 8] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
];

/// Vertical bar with optional second value, caption and help lines.
#[derive(Debug)]
pub struct BarGraph {
    base: WidgetBase,
    values: Vec<f64>,
    colors: Vec<Color>,
    minimum: f64,
    maximum: f64,
    stacked: bool,
    /// Left + right spacing together, screen pixels.
    spacing: i32,
    help_lines: i32,
    help_line_color: Color,
    background: Color,
    text: String,
    rotate_text: bool,
}

impl BarGraph {
    pub fn new(
        rect: Rect,
        value: f64,
        stacked: bool,
        text: &str,
        spacing: i32,
        help_lines: i32,
        background: Color,
    ) -> Self {
        Self::with_values(rect, vec![value], stacked, text, spacing, help_lines, background)
    }

    pub fn new_pair(
        rect: Rect,
        value1: f64,
        value2: f64,
        stacked: bool,
        text: &str,
        spacing: i32,
        help_lines: i32,
        background: Color,
    ) -> Self {
        Self::with_values(
            rect,
            vec![value1, value2],
            stacked,
            text,
            spacing,
            help_lines,
            background,
        )
    }

    fn with_values(
        rect: Rect,
        values: Vec<f64>,
        stacked: bool,
        text: &str,
        spacing: i32,
        help_lines: i32,
        background: Color,
    ) -> Self {
        let colors = (0..values.len())
            .map(|i| DEFAULT_BAR_COLORS[i % DEFAULT_BAR_COLORS.len()])
            .collect();
        Self {
            base: WidgetBase::new(rect, KeyButton::NONE),
            values,
            colors,
            minimum: 0.0,
            maximum: 1.0,
            stacked,
            spacing,
            help_lines,
            help_line_color: Color::BLACK,
            background,
            text: text.to_string(),
            rotate_text: false,
        }
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum;
        self.maximum = maximum;
    }

    /// Override the color of bar `n`; out-of-range indexes are ignored.
    pub fn set_color(&mut self, n: usize, color: Color) {
        if let Some(slot) = self.colors.get_mut(n) {
            *slot = color;
        }
    }

    pub fn set_help_line_color(&mut self, color: Color) {
        self.help_line_color = color;
    }

    /// Render the caption rotated 90°, for narrow bars in dense charts.
    pub fn rotate(&mut self) {
        self.rotate_text = true;
    }

    /// Bar height fraction of the graph area, clamped into `[0, 1]`.
    fn normalized(&self, value: f64) -> f64 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.minimum) / span).clamp(0.0, 1.0)
    }

    /// Graph area above the caption strip, 8× coordinates.
    fn graph_area(&self) -> Rect {
        let r8 = self.base.rect.to_subpixel();
        let strip = if self.text.is_empty() {
            0
        } else {
            TEXT_STRIP_PX * 8
        };
        Rect::new(
            r8.x + self.spacing * 4,
            r8.y,
            (r8.width - self.spacing * 8).max(0),
            (r8.height - strip).max(0),
        )
    }

    fn paint_bars(&self, canvas: &mut dyn Canvas, area: Rect) {
        if self.values.is_empty() || area.width <= 0 || area.height <= 0 {
            return;
        }
        if self.stacked {
            let mut bottom = area.bottom();
            for (value, color) in self.values.iter().zip(&self.colors) {
                let height = (self.normalized(*value) * area.height as f64) as i32;
                bottom -= height;
                canvas.set_color(*color);
                canvas.fill_rect(Rect::new(area.x, bottom, area.width, height));
            }
        } else {
            let slot = area.width / self.values.len() as i32;
            for (n, (value, color)) in self.values.iter().zip(&self.colors).enumerate() {
                let height = (self.normalized(*value) * area.height as f64) as i32;
                canvas.set_color(*color);
                canvas.fill_rect(Rect::new(
                    area.x + slot * n as i32,
                    area.bottom() - height,
                    slot,
                    height,
                ));
            }
        }
    }

    fn paint_help_lines(&self, canvas: &mut dyn Canvas, area: Rect) {
        if self.help_lines <= 0 {
            return;
        }
        canvas.set_color(self.help_line_color);
        for n in 1..=self.help_lines {
            let y = area.bottom() - area.height * n / (self.help_lines + 1);
            canvas.line(
                crate::geom::Point::new(area.left(), y),
                crate::geom::Point::new(area.right(), y),
            );
        }
    }
}

impl Widget for BarGraph {
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

        let area = self.graph_area();
        self.paint_bars(canvas, area);
        self.paint_help_lines(canvas, area);

        if !self.text.is_empty() {
            let strip = Rect::new(r8.x, area.bottom(), r8.width, r8.height - area.height);
            canvas.text(&self.text, strip, self.rotate_text);
        }
    }
}
