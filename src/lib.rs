//! Touchscreen widget toolkit and event pipeline for an SDL-backed
//! point-of-sale application.
//!
//! The embedding application owns the windowing layer and feeds raw input
//! through [`input::InputSource`]; the [`pump::EventPump`] worker classifies
//! it into semantic [`event::Event`]s and the render loop drains them into
//! the active [`interface::EventInterface`]. Widgets paint through the
//! [`render::Canvas`] boundary at 8× sub-pixel coordinates.

pub mod config;
pub mod event;
pub mod geom;
pub mod input;
pub mod interface;
pub mod key_log;
pub mod keys;
mod lock;
pub mod logging;
pub mod pump;
pub mod queue;
pub mod render;
pub mod touch_map;
pub mod widgets;

pub use config::PointerTiming;
pub use event::{Event, EventKind, EventOrigin, PollStatus};
pub use geom::{Point, Rect, Size, SUBPIXEL_SCALE};
pub use input::{channel_input_source, ChannelInputSource, InputSource, RawEvent};
pub use interface::{EventInterface, EventOutcome, ObjectId};
pub use keys::{KeyButton, KeyMods};
pub use logging::init_logging;
pub use pump::{EventPump, PointerStatus};
pub use touch_map::TouchMap;
