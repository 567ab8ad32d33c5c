//! Bounded queue of inbound key notifications.
//!
//! The platform keyboard widget reports raw key transitions; the session
//! records them so the render loop can replay recent input once per frame.
//! The queue is bounded to keep memory flat when nothing drains it.

use std::collections::VecDeque;

/// Maximum number of key events retained between drains.
///
/// When the queue exceeds this size the oldest events are dropped, so a
/// render loop that stalls or never drains cannot grow the queue.
const KEEP_EVENTS_COUNT: usize = 10;

/// Direction of a key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    /// The key went down.
    Down,
    /// The key was released.
    Up,
}

/// One inbound key notification, as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Whether the key went down or up.
    pub kind: KeyEventKind,
    /// Platform key code; see [`crate::config::key_codes`] for the codes
    /// the bridge itself recognizes.
    pub code: i32,
}

impl KeyEvent {
    /// Creates a key-down event.
    pub fn down(code: i32) -> Self {
        Self {
            kind: KeyEventKind::Down,
            code,
        }
    }

    /// Creates a key-up event.
    pub fn up(code: i32) -> Self {
        Self {
            kind: KeyEventKind::Up,
            code,
        }
    }
}

/// FIFO queue of recent key events, bounded by [`KEEP_EVENTS_COUNT`].
#[derive(Default, Debug)]
pub(crate) struct KeyEventQueue {
    events: VecDeque<KeyEvent>,
}

impl KeyEventQueue {
    /// Appends an event, dropping the oldest one if the queue is full.
    pub(crate) fn push_event(&mut self, event: KeyEvent) {
        self.events.push_back(event);
        if self.events.len() > KEEP_EVENTS_COUNT {
            self.events.pop_front();
        }
    }

    /// Drains all queued events, oldest first.
    pub(crate) fn take_events(&mut self) -> Vec<KeyEvent> {
        self.events.drain(..).collect()
    }
}
