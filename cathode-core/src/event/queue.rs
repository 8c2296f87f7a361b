//! Fixed-capacity event ring buffer
//!
//! Sixteen slots, overwrite-oldest on overflow: a UI that stalls loses
//! history, never fresh input. Push and pop are plain `&mut` operations;
//! callers that share the queue with an interrupt wrap it in the board's
//! critical-section primitive.

use super::Event;

/// Number of pending events the queue can hold
pub const QUEUE_LEN: usize = 16;

/// Ring buffer of pending events
pub struct EventQueue {
    slots: [Option<Event>; QUEUE_LEN],
    head: usize,
    tail: usize,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            slots: [None; QUEUE_LEN],
            head: 0,
            tail: 0,
        }
    }

    /// Discard all pending events
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.slots = [None; QUEUE_LEN];
    }

    /// Append an event; when full, the oldest pending event is discarded
    pub fn push(&mut self, event: Event) {
        self.slots[self.head] = Some(event);
        self.head = (self.head + 1) % QUEUE_LEN;
        if self.head == self.tail {
            self.tail = (self.tail + 1) % QUEUE_LEN;
        }
    }

    /// Remove and return the oldest pending event
    pub fn pop(&mut self) -> Option<Event> {
        if self.head == self.tail {
            return None;
        }
        let event = self.slots[self.tail].take();
        self.tail = (self.tail + 1) % QUEUE_LEN;
        event
    }

    /// The oldest pending event without removing it
    pub fn peek(&self) -> Option<Event> {
        if self.head == self.tail {
            None
        } else {
            self.slots[self.tail]
        }
    }

    /// Whether any event is pending
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = EventQueue::new();
        q.push(Event::SecondElapsed);
        q.push(Event::LeftRotary(2));
        q.push(Event::TimerExpired(3));

        assert_eq!(q.pop(), Some(Event::SecondElapsed));
        assert_eq!(q.pop(), Some(Event::LeftRotary(2)));
        assert_eq!(q.pop(), Some(Event::TimerExpired(3)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut q = EventQueue::new();
        q.push(Event::Chord(0x21));
        assert_eq!(q.peek(), Some(Event::Chord(0x21)));
        assert_eq!(q.pop(), Some(Event::Chord(0x21)));
        assert_eq!(q.peek(), None);
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut q = EventQueue::new();
        // Capacity is QUEUE_LEN - 1 before the ring overwrites
        for n in 0..QUEUE_LEN as u8 + 3 {
            q.push(Event::TimerExpired(n));
        }
        // The earliest events are gone, the newest survived
        let first = q.pop().unwrap();
        assert_eq!(first, Event::TimerExpired(4));
        let mut last = first;
        while let Some(e) = q.pop() {
            last = e;
        }
        assert_eq!(last, Event::TimerExpired(QUEUE_LEN as u8 + 2));
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut q = EventQueue::new();
        q.push(Event::SecondElapsed);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }
}
