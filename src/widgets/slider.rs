//! Scrollbar/slider dialog object.
//!
//! The value maps linearly onto the track minus the visible span: a list of
//! `maximum - minimum` items with `items_on_screen` of them visible scrolls
//! over `maximum - minimum - items_on_screen` positions. All drag positions
//! arrive in 8× sub-pixel coordinates, matching paint output.

use crate::geom::{Point, Rect};
use crate::keys::KeyButton;
use crate::render::{Canvas, Color};
use crate::widgets::base::{Widget, WidgetBase};

/// Distance (8× units) the track line stays away from the rect ends.
const TRACK_END_INSET: i32 = 24;
/// Thumb bitmap span in 8× units.
const THUMB_SPAN: i32 = 48;
/// Height (screen pixels) reserved for the thumb when spreading the track.
const THUMB_HEIGHT_PX: i32 = 6;
/// Wheel steps move one screen's worth minus a sliver of overlap context.
const WHEEL_PAGE_OVERLAP: f64 = 1.01;

const DEFAULT_THUMB_IMAGE: &str = "slider-thumb-48";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderStyle {
    Vertical,
    /// Vertical with up/down nudge zones; paints identically.
    VerticalUpDown,
}

/// Vertical scrollbar with a draggable thumb.
#[derive(Debug)]
pub struct Slider {
    base: WidgetBase,
    style: SliderStyle,
    value: f64,
    minimum: f64,
    maximum: f64,
    items_on_screen: f64,
    drag_disabled: bool,
    track_color: Color,
    mark_color: Color,
    thumb_image: String,
}

impl Slider {
    pub fn new(rect: Rect, unit_size: i32, key: KeyButton, style: SliderStyle) -> Self {
        let unit = unit_size.max(1);
        Self {
            base: WidgetBase::new(rect, key),
            style,
            value: 0.0,
            minimum: 0.0,
            maximum: 1.0,
            items_on_screen: (rect.height / unit) as f64,
            drag_disabled: false,
            track_color: Color::WHITE,
            mark_color: Color::BLACK,
            thumb_image: DEFAULT_THUMB_IMAGE.to_string(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn items_on_screen(&self) -> f64 {
        self.items_on_screen
    }

    /// Suppress manual dragging, used while an auto-scroll animation owns the
    /// value. Cleared again by [`Widget::on_drag_end`].
    pub fn set_drag_disabled(&mut self, disabled: bool) {
        self.drag_disabled = disabled;
    }

    pub fn set_colors(&mut self, track: Color, marks: Color) {
        self.track_color = track;
        self.mark_color = marks;
    }

    pub fn set_thumb_image(&mut self, image: &str) {
        self.thumb_image = image.to_string();
    }

    /// Set the scrollable range, clamping the current value back inside
    /// `[minimum, maximum - items_on_screen]`. Returns whether the value had
    /// to move (callers repaint on `true`).
    pub fn set_range(&mut self, minimum: f64, maximum: f64) -> bool {
        self.minimum = minimum;
        self.maximum = maximum;
        let before = self.value;
        self.value = self.clamped(self.value);
        self.value != before
    }

    /// Scroll up close to one page.
    pub fn wheel_up(&mut self) -> bool {
        self.value -= self.items_on_screen - WHEEL_PAGE_OVERLAP;
        if self.value < self.minimum {
            self.value = self.minimum;
        }
        true
    }

    /// Scroll down close to one page.
    pub fn wheel_down(&mut self) -> bool {
        self.value = self.clamped(self.value + self.items_on_screen - WHEEL_PAGE_OVERLAP);
        true
    }

    fn clamped(&self, value: f64) -> f64 {
        let mut value = value;
        if value > self.maximum - self.items_on_screen {
            value = self.maximum - self.items_on_screen;
        }
        // Range too small to fill the screen: there is nothing to scroll.
        if self.maximum - self.minimum + 1.0 < self.items_on_screen {
            value = self.minimum;
        }
        if value < self.minimum {
            value = self.minimum;
        }
        value
    }

    fn sliding_range(&self) -> f64 {
        self.maximum - self.minimum - self.items_on_screen
    }

    /// Thumb top edge in 8× coordinates for the current value.
    fn thumb_y(&self) -> i32 {
        let rect = self.base.rect;
        let usable = ((rect.height - THUMB_HEIGHT_PX) * 8) as f64;
        let offset = if self.sliding_range() > 0.0 {
            usable * (self.value - self.minimum) / self.sliding_range()
        } else {
            0.0
        };
        offset as i32 + rect.top() * 8
    }

    fn paint_vertical(&self, canvas: &mut dyn Canvas) {
        let rect = self.base.rect;
        let r8 = rect.to_subpixel();

        canvas.set_color(self.track_color);
        canvas.rectangle(r8, rect.width * 4, rect.width * 3);

        canvas.set_color(self.mark_color);
        let x = (r8.left() + r8.right()) / 2;
        let y1 = r8.top() + TRACK_END_INSET;
        let y2 = r8.bottom() - TRACK_END_INSET;
        canvas.line(Point::new(x, y1), Point::new(x, y2));
        canvas.line(Point::new(x - 10, y1), Point::new(x + 10, y1));
        canvas.line(Point::new(x - 5, (y1 + y2) / 2), Point::new(x + 5, (y1 + y2) / 2));
        canvas.line(Point::new(x - 10, y2), Point::new(x + 10, y2));

        let left = r8.left() + rect.width * 4 - TRACK_END_INSET;
        canvas.image(
            &self.thumb_image,
            Rect::new(left, self.thumb_y(), THUMB_SPAN, THUMB_SPAN),
        );
    }
}

impl Widget for Slider {
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
        match self.style {
            SliderStyle::Vertical | SliderStyle::VerticalUpDown => self.paint_vertical(canvas),
        }
    }

    fn on_drag(&mut self, p: Point) -> bool {
        if self.drag_disabled {
            return false;
        }
        let rect = self.base.rect;
        let y = p.y - rect.top() * 8 - TRACK_END_INSET;
        let usable = (rect.height * 8 - 2 * TRACK_END_INSET) as f64;
        let value = self.clamped(self.minimum + self.sliding_range() * y as f64 / usable);
        if self.value != value {
            self.value = value;
            return true;
        }
        false
    }

    fn on_drag_end(&mut self, p: Point) -> bool {
        self.on_drag(p);
        self.drag_disabled = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingCanvas};
    use proptest::prelude::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    /// 30px tall track with unit 10 shows 3 items.
    fn slider_0_to_10() -> Slider {
        let mut slider = Slider::new(
            Rect::new(0, 0, 10, 30),
            10,
            KeyButton(9),
            SliderStyle::Vertical,
        );
        slider.set_range(0.0, 10.0);
        slider
    }

    fn drag_to(slider: &mut Slider, y: i32) -> bool {
        slider.on_drag(Point::new(0, y))
    }

    #[test]
    fn items_on_screen_derives_from_geometry_and_unit_size() {
        let slider = slider_0_to_10();
        assert!((slider.items_on_screen() - 3.0).abs() < EPS);
    }

    #[test]
    fn wheel_down_steps_by_almost_a_page_and_clamps() {
        let mut slider = slider_0_to_10();
        drag_to(&mut slider, 24 + 137); // land mid-track
        let mid = slider.value();
        assert!(mid > 4.0 && mid < 6.0, "expected mid-track start, got {mid}");

        // From exactly 5: 5 + (3 - 1.01) = 6.99, inside [0, 7].
        slider.value = 5.0;
        assert!(slider.wheel_down());
        assert!((slider.value() - 6.99).abs() < EPS);

        // A second page hits the ceiling of maximum - items_on_screen.
        assert!(slider.wheel_down());
        assert!((slider.value() - 7.0).abs() < EPS);
    }

    #[test]
    fn wheel_up_clamps_at_minimum() {
        let mut slider = slider_0_to_10();
        slider.value = 1.0;
        assert!(slider.wheel_up());
        assert!((slider.value() - 0.0).abs() < EPS);
    }

    #[rstest]
    #[case(0.0, 10.0, 5.0, 5.0)] // inside range, untouched
    #[case(0.0, 6.0, 5.0, 3.0)] // shrunk top: clamp to max - items
    #[case(6.0, 20.0, 5.0, 6.0)] // raised floor: clamp to min
    fn set_range_clamps_current_value(
        #[case] min: f64,
        #[case] max: f64,
        #[case] start: f64,
        #[case] expected: f64,
    ) {
        let mut slider = slider_0_to_10();
        slider.value = start;
        let clamped = slider.set_range(min, max);
        assert_eq!(clamped, (start - expected).abs() > EPS);
        assert!((slider.value() - expected).abs() < EPS);
    }

    #[test]
    fn range_smaller_than_screen_pins_value_to_minimum() {
        let mut slider = slider_0_to_10();
        slider.set_range(2.0, 3.0); // 1 item, 3 visible
        assert!((slider.value() - 2.0).abs() < EPS);
        assert!(slider.wheel_down());
        assert!((slider.value() - 2.0).abs() < EPS);
        drag_to(&mut slider, 200);
        assert!((slider.value() - 2.0).abs() < EPS);
    }

    #[test]
    fn drag_interpolates_linearly_over_the_track() {
        let mut slider = slider_0_to_10();
        // Track spans y = 24 .. 216 in 8x units; midpoint maps to span/2.
        assert!(drag_to(&mut slider, 120));
        assert!((slider.value() - 3.5).abs() < EPS);
        assert!(drag_to(&mut slider, 24));
        assert!((slider.value() - 0.0).abs() < EPS);
        assert!(drag_to(&mut slider, 216));
        assert!((slider.value() - 7.0).abs() < EPS);
    }

    #[test]
    fn drag_reports_no_change_when_value_stays_put() {
        let mut slider = slider_0_to_10();
        assert!(drag_to(&mut slider, 216));
        assert!(!drag_to(&mut slider, 400), "already clamped at the maximum");
    }

    #[test]
    fn disabled_slider_rejects_drags_until_drag_end() {
        let mut slider = slider_0_to_10();
        slider.set_drag_disabled(true);
        assert!(!drag_to(&mut slider, 120));
        assert!((slider.value() - 0.0).abs() < EPS);

        assert!(slider.on_drag_end(Point::new(0, 120)));
        assert!(drag_to(&mut slider, 216), "drag end re-enables dragging");
    }

    #[test]
    fn paint_emits_track_marks_and_thumb() {
        let slider = slider_0_to_10();
        let mut canvas = RecordingCanvas::new();
        slider.paint(&mut canvas);

        let rectangles = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rectangle { .. }))
            .count();
        let lines = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(rectangles, 1);
        assert_eq!(lines, 4);
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { name, .. } if name == DEFAULT_THUMB_IMAGE)));
    }

    #[test]
    fn hidden_slider_paints_nothing() {
        let mut slider = slider_0_to_10();
        slider.set_visible(false);
        let mut canvas = RecordingCanvas::new();
        slider.paint(&mut canvas);
        assert!(canvas.ops.is_empty());
    }

    proptest! {
        #[test]
        fn drag_never_leaves_the_clamped_interval(y in -10_000i32..10_000) {
            let mut slider = slider_0_to_10();
            drag_to(&mut slider, y);
            prop_assert!(slider.value() >= 0.0 - EPS);
            prop_assert!(slider.value() <= 7.0 + EPS);
        }

        #[test]
        fn set_range_always_lands_inside_the_interval(
            min in -100.0f64..100.0,
            span in 0.0f64..200.0,
            start in -200.0f64..200.0,
        ) {
            let mut slider = slider_0_to_10();
            slider.value = start;
            let max = min + span;
            slider.set_range(min, max);
            let ceiling = (max - slider.items_on_screen()).max(min);
            prop_assert!(slider.value() >= min - EPS);
            prop_assert!(slider.value() <= ceiling + EPS);
        }
    }
}
