//! Dialog objects: the fixed widget set of the touchscreen application.

mod bar_graph;
mod base;
mod button;
mod slider;

pub use bar_graph::BarGraph;
pub use base::{Widget, WidgetBase};
pub use button::Button;
pub use slider::{Slider, SliderStyle};
