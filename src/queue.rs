//! Thread-safe FIFO of classified events between classifier and render loop.
//!
//! One producer (the pump worker) and one or more consumer calls share the
//! queue; every operation takes the single internal lock for its duration and
//! nothing else is shared. Unlike the push/front/pop contract this grew out
//! of, the accessors return `Option` so an empty queue can never be misread.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::event::Event;
use crate::lock::lock_or_recover;

#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&self, event: Event) {
        lock_or_recover(&self.events, "EventQueue::push_back").push_back(event);
    }

    /// Copy of the oldest queued event without removing it.
    pub fn front(&self) -> Option<Event> {
        lock_or_recover(&self.events, "EventQueue::front")
            .front()
            .cloned()
    }

    pub fn pop_front(&self) -> Option<Event> {
        lock_or_recover(&self.events, "EventQueue::pop_front").pop_front()
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.events, "EventQueue::len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop queued events that `predicate` rejects. Used when the active
    /// interface changes and pending drag events would target the wrong
    /// dialog.
    pub(crate) fn retain(&self, predicate: impl FnMut(&Event) -> bool) {
        lock_or_recover(&self.events, "EventQueue::retain").retain(predicate);
    }
}
