//! The event pump: raw platform input in, classified semantic events out.
//!
//! # Architecture
//!
//! - Worker thread: polls the [`InputSource`] once per cycle, runs the
//!   pointer state machine and pushes [`Event`]s into the shared queue
//! - Consumer: [`EventPump::poll_event`] drains one event per call and routes
//!   it to the interface it is given; widget mutation happens only there
//! - Timers: drag, click and repeat thresholds are wall-clock deadlines
//!   checked every cycle, so a pending timeout never blocks new input

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, trace};

use crate::config::PointerTiming;
use crate::event::{Event, EventKind, EventOrigin, PollStatus};
use crate::geom::{Point, Size};
use crate::input::{InputSource, RawEvent};
use crate::interface::{EventInterface, InterfaceRegistry, ObjectId};
use crate::key_log::{KeyLogKind, KeyLogRecord, KeyLogWriter};
use crate::keys::{KeyButton, KeyMods};
use crate::lock::lock_or_recover;
use crate::queue::EventQueue;

/// Sleep between cycles when the input source has nothing queued.
const IDLE_POLL: Duration = Duration::from_millis(2);
const WORKER_JOIN_TIMEOUT: Duration = Duration::from_millis(500);
const WORKER_JOIN_POLL: Duration = Duration::from_millis(10);

/// Pointer machine state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PointerStatus {
    /// No touch activity.
    Released = 0,
    /// Pressed, waiting to see whether this becomes a drag.
    WaitStartDrag = 1,
    /// Pressed inside a swype dialog; movement decides scroll vs drag.
    WaitScrollOrDrag = 2,
    /// Scrolling a swype dialog.
    Scrolling = 3,
    /// Dragging a dialog object.
    Dragging = 4,
    /// Held without drag; click candidate, possibly auto-repeating.
    Pressed = 5,
    /// Dragging an entire dialog.
    DraggingDialog = 6,
}

impl PointerStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::WaitStartDrag,
            2 => Self::WaitScrollOrDrag,
            3 => Self::Scrolling,
            4 => Self::Dragging,
            5 => Self::Pressed,
            6 => Self::DraggingDialog,
            _ => Self::Released,
        }
    }

    /// States a stop-drag request applies to.
    pub fn is_drag_family(self) -> bool {
        matches!(self, Self::Scrolling | Self::Dragging | Self::DraggingDialog)
    }
}

/// State shared between the worker, the consumer and control calls.
struct PumpShared {
    queue: EventQueue,
    registry: InterfaceRegistry,
    timing: PointerTiming,
    screen: Size,
    running: AtomicBool,
    stop_drag_requested: AtomicBool,
    forced_drag: Mutex<Option<Point>>,
    fuzzing: AtomicBool,
    status: AtomicU8,
    pressed: AtomicBool,
    last_mouse: Mutex<Point>,
    key_log: Mutex<Option<KeyLogWriter>>,
}

/// Capabilities of whatever sits under a fresh press, captured in one
/// registry lock so classification sees a consistent interface.
#[derive(Default, Clone, Copy)]
struct PressCaps {
    button: KeyButton,
    object: Option<ObjectId>,
    swype: bool,
    scroll_drag: bool,
    horizontal: bool,
}

/// Worker-local classifier. Only the worker thread mutates it; observable
/// bits are mirrored into [`PumpShared`] atomics after every transition.
struct Classifier {
    timing: PointerTiming,
    screen: Size,
    status: PointerStatus,
    origin: EventOrigin,
    press_point: Point,
    press_at: Instant,
    drag_deadline: Option<Instant>,
    repeat_deadline: Option<Instant>,
    repeats_emitted: u32,
    caps: PressCaps,
    scroll_last: Point,
    rng: u64,
}

impl Classifier {
    fn new(timing: PointerTiming, screen: Size) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self {
            timing,
            screen,
            status: PointerStatus::Released,
            origin: EventOrigin::User,
            press_point: Point::default(),
            press_at: Instant::now(),
            drag_deadline: None,
            repeat_deadline: None,
            repeats_emitted: 0,
            caps: PressCaps::default(),
            scroll_last: Point::default(),
            rng: seed | 1,
        }
    }

    fn publish(&self, shared: &PumpShared) {
        shared.status.store(self.status as u8, Ordering::Release);
        shared.pressed.store(
            self.status != PointerStatus::Released,
            Ordering::Release,
        );
    }

    fn emit(&self, shared: &PumpShared, kind: EventKind) {
        trace!("queue {:?}", kind);
        shared.queue.push_back(Event {
            kind,
            origin: self.origin,
        });
    }

    fn record_key(&self, shared: &PumpShared, kind: KeyLogKind, key: KeyButton, at: Point) {
        let mut guard = lock_or_recover(&shared.key_log, "Classifier::record_key");
        if let Some(writer) = guard.as_mut() {
            if let Err(err) = writer.append(&KeyLogRecord::now(kind, key, at)) {
                debug!("key log append failed: {err}");
            }
        }
    }

    fn note_mouse(&self, shared: &PumpShared, p: Point) {
        *lock_or_recover(&shared.last_mouse, "Classifier::note_mouse") = p;
    }

    fn dispatch_raw(&mut self, raw: RawEvent, shared: &PumpShared) {
        match raw {
            RawEvent::Press(p) => self.handle_press(p, shared),
            RawEvent::Release(p) => self.handle_release(p, shared),
            RawEvent::Motion(p) => self.handle_motion(p, shared),
            // The rest translate directly, whatever the pointer is doing.
            RawEvent::KeyDown { key, mods } => {
                self.emit(shared, EventKind::KeyPress { key, mods });
                self.record_key(shared, KeyLogKind::Press, key, Point::default());
            }
            RawEvent::KeyUp => self.emit(shared, EventKind::KeyRelease),
            RawEvent::Wheel { delta_y } => {
                self.emit(shared, EventKind::Wheel { up: delta_y > 0 });
            }
            RawEvent::MouseFocus { gained } => {
                self.emit(shared, EventKind::MouseFocus { gained });
            }
            RawEvent::InputFocus { gained } => {
                self.emit(shared, EventKind::InputFocus { gained });
            }
            RawEvent::Minimized => self.emit(shared, EventKind::Minimized),
            RawEvent::Restored => self.emit(shared, EventKind::Restored),
            RawEvent::Quit => self.emit(shared, EventKind::Quit),
        }
    }

    fn handle_press(&mut self, p: Point, shared: &PumpShared) {
        self.press_point = p;
        self.scroll_last = p;
        self.press_at = Instant::now();
        self.note_mouse(shared, p);
        self.emit(shared, EventKind::TouchPress(p));

        self.caps = shared
            .registry
            .with_active(|interface| PressCaps {
                button: interface.find_button(p),
                object: interface.find_object(p),
                swype: interface.is_swype_dialog(p),
                scroll_drag: interface.is_scroll_drag_dialog(p),
                horizontal: interface.is_horizontal_scroll_dialog(p),
            })
            .unwrap_or_default();

        self.status = if self.caps.swype {
            PointerStatus::WaitScrollOrDrag
        } else {
            PointerStatus::WaitStartDrag
        };
        self.drag_deadline = Some(self.press_at + self.timing.minimum_drag());
        self.repeat_deadline = None;
        self.repeats_emitted = 0;
        debug!(
            "press at ({}, {}) key {:?} -> {:?}",
            p.x, p.y, self.caps.button, self.status
        );
        self.publish(shared);
    }

    fn handle_motion(&mut self, p: Point, shared: &PumpShared) {
        self.note_mouse(shared, p);
        match self.status {
            PointerStatus::Released => self.emit(shared, EventKind::TouchMove(p)),
            PointerStatus::WaitStartDrag => {
                if self.past_drag_threshold(p) && self.caps.object.is_some() {
                    self.begin_drag(p, shared);
                } else {
                    self.emit(shared, EventKind::MouseMove(p));
                }
            }
            PointerStatus::WaitScrollOrDrag => {
                if self.past_drag_threshold(p) {
                    self.resolve_scroll_or_drag(p, shared);
                } else {
                    self.emit(shared, EventKind::MouseMove(p));
                }
            }
            PointerStatus::Scrolling => {
                let delta = p - self.scroll_last;
                if delta != Point::default() {
                    self.emit(
                        shared,
                        EventKind::Scroll {
                            start: self.press_point,
                            delta,
                        },
                    );
                    self.scroll_last = p;
                }
            }
            PointerStatus::Dragging | PointerStatus::DraggingDialog => {
                self.emit(
                    shared,
                    EventKind::DragMove {
                        object: self.caps.object,
                        to: p,
                    },
                );
            }
            PointerStatus::Pressed => self.emit(shared, EventKind::MouseMove(p)),
        }
        self.publish(shared);
    }

    fn past_drag_threshold(&self, p: Point) -> bool {
        p.chebyshev_distance(self.press_point) >= self.timing.drag_start_pixels
    }

    /// First movement past the threshold inside a swype dialog: movement
    /// along the scroll axis scrolls, movement across it drags when the
    /// dialog allows drag, otherwise it scrolls anyway.
    fn resolve_scroll_or_drag(&mut self, p: Point, shared: &PumpShared) {
        let delta = p - self.press_point;
        let (along, across) = if self.caps.horizontal {
            (delta.x.abs(), delta.y.abs())
        } else {
            (delta.y.abs(), delta.x.abs())
        };
        if along >= across || !self.caps.scroll_drag {
            self.begin_scroll(p, shared);
        } else if self.caps.object.is_some() {
            self.begin_drag(p, shared);
        } else {
            self.begin_dialog_drag(p, shared);
        }
    }

    fn begin_drag(&mut self, p: Point, shared: &PumpShared) {
        self.status = PointerStatus::Dragging;
        self.drag_deadline = None;
        self.emit(
            shared,
            EventKind::DragStart {
                object: self.caps.object,
                from: self.press_point,
            },
        );
        self.emit(
            shared,
            EventKind::DragMove {
                object: self.caps.object,
                to: p,
            },
        );
        debug!("drag start at ({}, {})", self.press_point.x, self.press_point.y);
    }

    fn begin_dialog_drag(&mut self, p: Point, shared: &PumpShared) {
        self.status = PointerStatus::DraggingDialog;
        self.drag_deadline = None;
        self.emit(
            shared,
            EventKind::DragStart {
                object: None,
                from: self.press_point,
            },
        );
        self.emit(shared, EventKind::DragMove { object: None, to: p });
        debug!("dialog drag start at ({}, {})", self.press_point.x, self.press_point.y);
    }

    fn begin_scroll(&mut self, p: Point, shared: &PumpShared) {
        self.status = PointerStatus::Scrolling;
        self.drag_deadline = None;
        let delta = p - self.scroll_last;
        self.emit(
            shared,
            EventKind::Scroll {
                start: self.press_point,
                delta,
            },
        );
        self.scroll_last = p;
        debug!("scroll start at ({}, {})", self.press_point.x, self.press_point.y);
    }

    fn handle_release(&mut self, p: Point, shared: &PumpShared) {
        self.note_mouse(shared, p);
        self.emit(shared, EventKind::TouchRelease(p));
        match self.status {
            PointerStatus::Dragging | PointerStatus::DraggingDialog => {
                self.emit(shared, EventKind::DragStop { at: p });
            }
            PointerStatus::Scrolling | PointerStatus::Released => {}
            PointerStatus::Pressed
            | PointerStatus::WaitStartDrag
            | PointerStatus::WaitScrollOrDrag => {
                // Repeats already consumed the press; a graze too short for
                // minimum_click never counts as a click.
                let held = self.press_at.elapsed();
                if self.repeats_emitted == 0 && held >= self.timing.minimum_click() {
                    self.emit(
                        shared,
                        EventKind::MouseClick {
                            key: self.caps.button,
                            at: self.press_point,
                        },
                    );
                    self.record_key(shared, KeyLogKind::Click, self.caps.button, self.press_point);
                }
            }
        }
        self.reset_pointer();
        self.publish(shared);
    }

    fn check_deadlines(&mut self, shared: &PumpShared) {
        let now = Instant::now();
        match self.status {
            PointerStatus::WaitStartDrag | PointerStatus::WaitScrollOrDrag => {
                if self.drag_deadline.is_some_and(|deadline| now >= deadline) {
                    self.status = PointerStatus::Pressed;
                    self.drag_deadline = None;
                    if !self.caps.button.is_none() {
                        self.repeat_deadline = Some(now + self.timing.repeat_delay());
                    }
                    debug!("press committed, key {:?}", self.caps.button);
                    self.publish(shared);
                }
            }
            PointerStatus::Pressed => {
                if self.repeat_deadline.is_some_and(|deadline| now >= deadline) {
                    self.emit(
                        shared,
                        EventKind::KeyPress {
                            key: self.caps.button,
                            mods: KeyMods::empty(),
                        },
                    );
                    self.record_key(shared, KeyLogKind::Repeat, self.caps.button, self.press_point);
                    self.repeats_emitted = self.repeats_emitted.saturating_add(1);
                    self.repeat_deadline = Some(now + self.timing.repeat_interval());
                }
            }
            _ => {}
        }
    }

    /// Silent reset used by stop-drag requests and interface switches. The
    /// caller has already delivered any stop notification it owes.
    fn abort_drag(&mut self, shared: &PumpShared) {
        if self.status.is_drag_family() {
            debug!("drag aborted from {:?}", self.status);
            self.reset_pointer();
            self.publish(shared);
        }
    }

    fn force_drag(&mut self, point: Point, shared: &PumpShared) {
        self.status = PointerStatus::Dragging;
        self.press_point = point;
        self.scroll_last = point;
        self.drag_deadline = None;
        self.publish(shared);
    }

    fn reset_pointer(&mut self) {
        self.status = PointerStatus::Released;
        self.drag_deadline = None;
        self.repeat_deadline = None;
        self.repeats_emitted = 0;
        self.caps = PressCaps::default();
    }

    fn next_rand(&mut self) -> u64 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng = x;
        x
    }

    fn random_point(&mut self) -> Point {
        let w = self.screen.width.max(1) as u64;
        let h = self.screen.height.max(1) as u64;
        Point::new(
            (self.next_rand() % w) as i32,
            (self.next_rand() % h) as i32,
        )
    }

    /// Synthetic raw event for fuzz mode. Never `Quit`; the fuzzed
    /// application should keep running until told otherwise.
    fn random_raw(&mut self) -> RawEvent {
        match self.next_rand() % 8 {
            0 => RawEvent::Press(self.random_point()),
            1 => RawEvent::Release(self.random_point()),
            2..=4 => RawEvent::Motion(self.random_point()),
            5 => RawEvent::Wheel {
                delta_y: if self.next_rand() % 2 == 0 { 1 } else { -1 },
            },
            6 => RawEvent::KeyDown {
                key: KeyButton((self.next_rand() % 200 + 1) as u16),
                mods: KeyMods::empty(),
            },
            _ => RawEvent::KeyUp,
        }
    }
}

fn run_worker(shared: Arc<PumpShared>, mut source: Box<dyn InputSource>) {
    let mut classifier = Classifier::new(shared.timing, shared.screen);
    while shared.running.load(Ordering::Acquire) {
        if shared.stop_drag_requested.swap(false, Ordering::AcqRel) {
            classifier.abort_drag(&shared);
        }
        if let Some(point) = lock_or_recover(&shared.forced_drag, "run_worker").take() {
            classifier.force_drag(point, &shared);
        }
        classifier.check_deadlines(&shared);
        match source.poll() {
            Some(raw) => {
                classifier.origin = EventOrigin::User;
                classifier.dispatch_raw(raw, &shared);
            }
            None => {
                if shared.fuzzing.load(Ordering::Relaxed) {
                    let raw = classifier.random_raw();
                    classifier.origin = EventOrigin::Test;
                    classifier.dispatch_raw(raw, &shared);
                }
                thread::sleep(IDLE_POLL);
            }
        }
    }
    debug!("event pump worker exiting");
}

/// The classifier/dispatcher. One worker thread per pump; create it with
/// [`EventPump::start`] and shut it down with [`EventPump::stop`] (also run
/// on drop).
pub struct EventPump {
    shared: Arc<PumpShared>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl EventPump {
    /// Spawn the worker over the given input source.
    pub fn start(
        timing: PointerTiming,
        screen: Size,
        source: impl InputSource + 'static,
    ) -> Self {
        let shared = Arc::new(PumpShared {
            queue: EventQueue::new(),
            registry: InterfaceRegistry::new(),
            timing,
            screen,
            running: AtomicBool::new(true),
            stop_drag_requested: AtomicBool::new(false),
            forced_drag: Mutex::new(None),
            fuzzing: AtomicBool::new(false),
            status: AtomicU8::new(PointerStatus::Released as u8),
            pressed: AtomicBool::new(false),
            last_mouse: Mutex::new(Point::default()),
            key_log: Mutex::new(None),
        });
        let worker_shared = Arc::clone(&shared);
        let boxed: Box<dyn InputSource> = Box::new(source);
        let handle = thread::spawn(move || run_worker(worker_shared, boxed));
        Self {
            shared,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Dequeue one classified event, route it to `interface` and report what
    /// happened. Never blocks beyond the queue lock.
    pub fn poll_event(&self, interface: &dyn EventInterface) -> PollStatus {
        let Some(event) = self.shared.queue.pop_front() else {
            return PollStatus::Empty;
        };
        match &event.kind {
            EventKind::DragStart { object, .. } => interface.on_start_drag(*object),
            EventKind::DragMove { object, to } => interface.drag_object(*object, *to),
            EventKind::DragStop { .. } => interface.on_stop_drag(),
            EventKind::Scroll { start, delta } => interface.scroll_dialog(*start, *delta),
            EventKind::Wheel { up } => interface.on_mouse_wheel(*up, !*up),
            _ => {}
        }
        interface.on_event(&event);
        match event.origin {
            EventOrigin::User => PollStatus::User,
            EventOrigin::Test => PollStatus::Testing,
        }
    }

    /// Swap the active interface. An in-flight drag is stopped against the
    /// old interface first and its queued drag events are purged, so the old
    /// dialog is never called again and the new one never sees a torso of a
    /// drag it did not start.
    pub fn register_active_interface(&self, interface: Option<Arc<dyn EventInterface>>) {
        if self.pointer_status().is_drag_family() {
            if let Some(old) = self.shared.registry.active() {
                debug!("stopping drag for outgoing interface {}", old.name());
                old.on_stop_drag();
            }
            self.shared
                .stop_drag_requested
                .store(true, Ordering::Release);
            self.shared.queue.retain(|event| !event.kind.is_drag());
        }
        let name = interface
            .as_ref()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "none".to_string());
        self.shared.registry.swap(interface);
        debug!("active interface now {name}");
    }

    pub fn active_interface(&self) -> Option<Arc<dyn EventInterface>> {
        self.shared.registry.active()
    }

    /// Abort any scroll or drag in progress. Honored from every
    /// dragging-family state; a no-op otherwise.
    pub fn stop_drag(&self) {
        self.shared
            .stop_drag_requested
            .store(true, Ordering::Release);
    }

    /// Jump the machine straight into a drag at `point`, for dialogs that
    /// hand an object to the pointer programmatically.
    pub fn force_drag(&self, point: Point) {
        *lock_or_recover(&self.shared.forced_drag, "EventPump::force_drag") = Some(point);
    }

    /// Start injecting randomized synthetic input whenever the source is
    /// idle. Injected events carry [`EventOrigin::Test`].
    pub fn start_fuzz_testing(&self) {
        self.shared.fuzzing.store(true, Ordering::Relaxed);
    }

    /// Mirror every classified key, click and repeat into `writer`.
    pub fn attach_key_log(&self, writer: KeyLogWriter) {
        *lock_or_recover(&self.shared.key_log, "EventPump::attach_key_log") = Some(writer);
    }

    pub fn last_mouse(&self) -> Point {
        *lock_or_recover(&self.shared.last_mouse, "EventPump::last_mouse")
    }

    pub fn is_pressed(&self) -> bool {
        self.shared.pressed.load(Ordering::Acquire)
    }

    pub fn pointer_status(&self) -> PointerStatus {
        PointerStatus::from_u8(self.shared.status.load(Ordering::Acquire))
    }

    /// Classified events waiting for a consumer.
    pub fn pending_events(&self) -> usize {
        self.shared.queue.len()
    }

    /// Signal the worker to exit and join it, detaching after a bounded wait.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
        let handle = lock_or_recover(&self.worker, "EventPump::stop").take();
        let Some(handle) = handle else {
            return;
        };
        let deadline = Instant::now() + WORKER_JOIN_TIMEOUT;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(WORKER_JOIN_POLL);
        }
        if handle.is_finished() {
            if let Err(err) = handle.join() {
                debug!("event pump worker panicked during shutdown: {err:?}");
            }
        } else {
            debug!(
                "event pump worker did not exit within {}ms; detaching",
                WORKER_JOIN_TIMEOUT.as_millis()
            );
        }
    }
}

impl Drop for EventPump {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_shared(timing: PointerTiming) -> PumpShared {
        PumpShared {
            queue: EventQueue::new(),
            registry: InterfaceRegistry::new(),
            timing,
            screen: Size::new(800, 600),
            running: AtomicBool::new(true),
            stop_drag_requested: AtomicBool::new(false),
            forced_drag: Mutex::new(None),
            fuzzing: AtomicBool::new(false),
            status: AtomicU8::new(0),
            pressed: AtomicBool::new(false),
            last_mouse: Mutex::new(Point::default()),
            key_log: Mutex::new(None),
        }
    }

    fn drain_kinds(shared: &PumpShared) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        while let Some(event) = shared.queue.pop_front() {
            kinds.push(event.kind);
        }
        kinds
    }

    fn fast_timing() -> PointerTiming {
        PointerTiming {
            minimum_drag_ms: 40,
            minimum_click_ms: 0,
            repeat_delay_ms: 30,
            repeat_interval_ms: 10,
            drag_start_pixels: 10,
        }
    }

    #[test]
    fn press_without_interface_waits_to_start_a_plain_drag() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(100, 100), &shared);
        assert_eq!(classifier.status, PointerStatus::WaitStartDrag);
        assert!(shared.pressed.load(Ordering::Acquire));

        // No dialog object under the press: large movement stays undragged.
        classifier.handle_motion(Point::new(200, 200), &shared);
        assert_eq!(classifier.status, PointerStatus::WaitStartDrag);
        let kinds = drain_kinds(&shared);
        assert!(kinds
            .iter()
            .all(|kind| !matches!(kind, EventKind::DragStart { .. })));
    }

    #[test]
    fn quick_release_emits_a_single_click() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(50, 50), &shared);
        classifier.caps.button = KeyButton(7); // as if hit-testing found a button
        classifier.handle_release(Point::new(51, 50), &shared);

        let kinds = drain_kinds(&shared);
        let clicks: Vec<_> = kinds
            .iter()
            .filter(|kind| matches!(kind, EventKind::MouseClick { .. }))
            .collect();
        assert_eq!(clicks.len(), 1);
        assert_eq!(classifier.status, PointerStatus::Released);
        assert!(!shared.pressed.load(Ordering::Acquire));
    }

    #[test]
    fn graze_shorter_than_minimum_click_is_swallowed() {
        let mut timing = fast_timing();
        timing.minimum_click_ms = 10_000; // nothing human passes this in a test
        let shared = test_shared(timing);
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(50, 50), &shared);
        classifier.handle_release(Point::new(50, 50), &shared);

        let kinds = drain_kinds(&shared);
        assert!(kinds
            .iter()
            .all(|kind| !matches!(kind, EventKind::MouseClick { .. })));
    }

    #[test]
    fn deadline_commits_press_and_then_repeats() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(50, 50), &shared);
        classifier.caps.button = KeyButton(7);
        classifier.drag_deadline = Some(Instant::now() - Duration::from_millis(1));
        classifier.check_deadlines(&shared);
        assert_eq!(classifier.status, PointerStatus::Pressed);

        classifier.repeat_deadline = Some(Instant::now() - Duration::from_millis(1));
        classifier.check_deadlines(&shared);
        classifier.repeat_deadline = Some(Instant::now() - Duration::from_millis(1));
        classifier.check_deadlines(&shared);
        assert_eq!(classifier.repeats_emitted, 2);

        classifier.handle_release(Point::new(50, 50), &shared);
        let kinds = drain_kinds(&shared);
        let repeats = kinds
            .iter()
            .filter(|kind| matches!(kind, EventKind::KeyPress { .. }))
            .count();
        assert_eq!(repeats, 2);
        assert!(
            kinds
                .iter()
                .all(|kind| !matches!(kind, EventKind::MouseClick { .. })),
            "no click after repeats fired"
        );
    }

    #[test]
    fn movement_past_threshold_on_an_object_drags_exactly_once() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(100, 100), &shared);
        classifier.caps.object = Some(ObjectId(3));
        classifier.handle_motion(Point::new(100, 120), &shared);
        classifier.handle_motion(Point::new(100, 140), &shared);
        classifier.handle_release(Point::new(100, 150), &shared);

        let kinds = drain_kinds(&shared);
        let starts = kinds
            .iter()
            .filter(|kind| matches!(kind, EventKind::DragStart { .. }))
            .count();
        let stops = kinds
            .iter()
            .filter(|kind| matches!(kind, EventKind::DragStop { .. }))
            .count();
        assert_eq!(starts, 1);
        assert_eq!(stops, 1);
        assert!(kinds.iter().any(|kind| matches!(
            kind,
            EventKind::DragMove {
                object: Some(ObjectId(3)),
                ..
            }
        )));
    }

    #[test]
    fn swype_press_scrolls_along_the_vertical_axis() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(100, 100), &shared);
        classifier.caps.swype = true;
        classifier.status = PointerStatus::WaitScrollOrDrag;
        classifier.handle_motion(Point::new(102, 140), &shared);
        assert_eq!(classifier.status, PointerStatus::Scrolling);

        classifier.handle_motion(Point::new(102, 150), &shared);
        let kinds = drain_kinds(&shared);
        let scrolls: Vec<_> = kinds
            .iter()
            .filter_map(|kind| match kind {
                EventKind::Scroll { delta, .. } => Some(*delta),
                _ => None,
            })
            .collect();
        assert_eq!(scrolls, vec![Point::new(2, 40), Point::new(0, 10)]);
    }

    #[test]
    fn cross_axis_movement_on_a_scroll_drag_dialog_drags_the_dialog() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.handle_press(Point::new(100, 100), &shared);
        classifier.caps.swype = true;
        classifier.caps.scroll_drag = true;
        classifier.status = PointerStatus::WaitScrollOrDrag;
        // Vertical scroll dialog, mostly-horizontal movement.
        classifier.handle_motion(Point::new(140, 103), &shared);
        assert_eq!(classifier.status, PointerStatus::DraggingDialog);

        let kinds = drain_kinds(&shared);
        assert!(kinds
            .iter()
            .any(|kind| matches!(kind, EventKind::DragStart { object: None, .. })));
    }

    #[test]
    fn stop_drag_resets_only_drag_family_states() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.status = PointerStatus::Dragging;
        classifier.abort_drag(&shared);
        assert_eq!(classifier.status, PointerStatus::Released);

        classifier.status = PointerStatus::Pressed;
        classifier.abort_drag(&shared);
        assert_eq!(classifier.status, PointerStatus::Pressed);
    }

    #[test]
    fn translations_pass_through_in_any_state() {
        let shared = test_shared(fast_timing());
        let mut classifier = Classifier::new(shared.timing, Size::new(800, 600));
        classifier.status = PointerStatus::Dragging;
        classifier.dispatch_raw(
            RawEvent::KeyDown {
                key: KeyButton(11),
                mods: KeyMods::CTRL,
            },
            &shared,
        );
        classifier.dispatch_raw(RawEvent::Wheel { delta_y: -3 }, &shared);
        classifier.dispatch_raw(RawEvent::Minimized, &shared);
        classifier.dispatch_raw(RawEvent::Quit, &shared);

        let kinds = drain_kinds(&shared);
        assert_eq!(
            kinds,
            vec![
                EventKind::KeyPress {
                    key: KeyButton(11),
                    mods: KeyMods::CTRL
                },
                EventKind::Wheel { up: false },
                EventKind::Minimized,
                EventKind::Quit,
            ]
        );
        assert_eq!(classifier.status, PointerStatus::Dragging);
    }

    #[test]
    fn fuzz_events_stay_on_screen_and_never_quit() {
        let mut classifier = Classifier::new(fast_timing(), Size::new(320, 240));
        for _ in 0..500 {
            match classifier.random_raw() {
                RawEvent::Press(p) | RawEvent::Release(p) | RawEvent::Motion(p) => {
                    assert!(p.x >= 0 && p.x < 320);
                    assert!(p.y >= 0 && p.y < 240);
                }
                RawEvent::Quit => panic!("fuzz mode must not quit the application"),
                _ => {}
            }
        }
    }

    #[test]
    fn pointer_status_round_trips_through_u8() {
        for status in [
            PointerStatus::Released,
            PointerStatus::WaitStartDrag,
            PointerStatus::WaitScrollOrDrag,
            PointerStatus::Scrolling,
            PointerStatus::Dragging,
            PointerStatus::Pressed,
            PointerStatus::DraggingDialog,
        ] {
            assert_eq!(PointerStatus::from_u8(status as u8), status);
        }
        assert_eq!(PointerStatus::from_u8(250), PointerStatus::Released);
    }
}
