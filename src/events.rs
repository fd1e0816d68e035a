//! Timer-driven event queue.
//!
//! The ambient light timer runs in the esp_timer task and must not take the
//! service lock.  Its callback only pushes an [`Event`] here; the main loop
//! drains the queue and handles each event with the lock held.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ esp_timer cb │────▶│  EventQueue  │────▶│  Main Loop   │
//! │  (producer)  │     │  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Maximum number of pending events.  One slot stays empty to tell
/// full from empty.
pub const EVENT_QUEUE_CAP: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// The ambient light timer fired.
    LightSampleTick = 1,
}

impl Event {
    fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::LightSampleTick),
            _ => None,
        }
    }
}

/// Single-producer single-consumer ring buffer built from atomics only.
pub struct EventQueue {
    buf: [AtomicU8; EVENT_QUEUE_CAP],
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            buf: [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Push an event.  Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: Event) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % EVENT_QUEUE_CAP;
        if next == self.tail.load(Ordering::Acquire) {
            return false;
        }
        self.buf[head].store(event as u8, Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        true
    }

    /// Pop the oldest event.
    pub fn pop(&self) -> Option<Event> {
        loop {
            let tail = self.tail.load(Ordering::Relaxed);
            if tail == self.head.load(Ordering::Acquire) {
                return None;
            }
            let raw = self.buf[tail].load(Ordering::Relaxed);
            self.tail.store((tail + 1) % EVENT_QUEUE_CAP, Ordering::Release);
            // Unknown discriminants are skipped.
            if let Some(event) = Event::from_u8(raw) {
                return Some(event);
            }
        }
    }

    /// Drain every pending event in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tail.load(Ordering::Relaxed) == self.head.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue shared by the light timer callback and the main loop.
pub static EVENTS: EventQueue = EventQueue::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_pops_none() {
        let q = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn fifo_and_len() {
        let q = EventQueue::new();
        assert!(q.push(Event::LightSampleTick));
        assert!(q.push(Event::LightSampleTick));
        assert_eq!(q.len(), 2);
        let mut seen = 0;
        q.drain(|e| {
            assert_eq!(e, Event::LightSampleTick);
            seen += 1;
        });
        assert_eq!(seen, 2);
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops() {
        let q = EventQueue::new();
        for _ in 0..EVENT_QUEUE_CAP - 1 {
            assert!(q.push(Event::LightSampleTick));
        }
        assert!(!q.push(Event::LightSampleTick));
        assert_eq!(q.len(), EVENT_QUEUE_CAP - 1);
    }

    #[test]
    fn wraps_around() {
        let q = EventQueue::new();
        for _ in 0..3 * EVENT_QUEUE_CAP {
            assert!(q.push(Event::LightSampleTick));
            assert_eq!(q.pop(), Some(Event::LightSampleTick));
        }
        assert!(q.is_empty());
    }
}
