//! Raw input boundary so the classifier never touches windowing-layer types.
//!
//! The embedding application owns the actual platform layer (SDL in
//! production) and translates its events into [`RawEvent`] values. The pump
//! worker polls an [`InputSource`] once per cycle; a `None` return means
//! "nothing right now" and lets the timer checks run.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use crate::geom::Point;
use crate::keys::{KeyButton, KeyMods};

/// Max pending raw events before the producer blocks.
const RAW_CHANNEL_CAPACITY: usize = 256;

/// One raw platform input event, already mapped to toolkit types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Primary button / finger down at a screen position.
    Press(Point),
    Release(Point),
    Motion(Point),
    KeyDown { key: KeyButton, mods: KeyMods },
    KeyUp,
    /// Wheel rotation; positive `delta_y` rolls away from the user.
    Wheel { delta_y: i32 },
    MouseFocus { gained: bool },
    InputFocus { gained: bool },
    Minimized,
    Restored,
    Quit,
}

/// Non-blocking source of raw input polled by the pump worker.
pub trait InputSource: Send {
    /// Next pending raw event, or `None` when the platform has nothing queued.
    fn poll(&mut self) -> Option<RawEvent>;
}

/// [`InputSource`] fed from another thread over a bounded channel.
pub struct ChannelInputSource {
    rx: Receiver<RawEvent>,
    disconnected: bool,
}

/// Create a producer/source pair for feeding raw events across threads.
///
/// The sender side lives wherever the platform event loop runs; the source
/// side moves into the pump worker.
pub fn channel_input_source() -> (Sender<RawEvent>, ChannelInputSource) {
    let (tx, rx) = bounded(RAW_CHANNEL_CAPACITY);
    (
        tx,
        ChannelInputSource {
            rx,
            disconnected: false,
        },
    )
}

impl InputSource for ChannelInputSource {
    fn poll(&mut self) -> Option<RawEvent> {
        if self.disconnected {
            return None;
        }
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }
}
