//! Event production and consumption glue
//!
//! `scan_for_events` drains the input sources into the queue; each source
//! is touched under its own short lock and the queue is filled in one
//! final lock, so no two resource locks ever nest.

use embassy_time::Timer;

use cathode_core::event::{Event, InputSnapshot};

use crate::shared::{BUTTONS, EVENTS, LEFT_ENCODER, RIGHT_ENCODER, TIMERS};

/// Drain button latches, rotary counters and timer flags into the queue
pub fn scan_for_events() {
    let (pressed, released, short, long, held, chord) = BUTTONS.lock(|b| {
        let mut b = b.borrow_mut();
        (
            b.take_pressed(),
            b.take_released(),
            b.take_short(),
            b.take_long(),
            b.read_debounced(),
            b.take_chord(),
        )
    });
    let left = LEFT_ENCODER.lock(|e| e.borrow_mut().take_relative());
    let right = RIGHT_ENCODER.lock(|e| e.borrow_mut().take_relative());
    let expired = TIMERS.lock(|t| t.borrow_mut().take_status());

    let snapshot = InputSnapshot {
        pressed,
        released,
        short,
        long,
        held,
        chord,
        left,
        right,
        expired,
    };

    EVENTS.lock(|q| snapshot.dispatch(&mut q.borrow_mut()));
}

/// Next pending event, if any
pub fn get_next_event() -> Option<Event> {
    scan_for_events();
    EVENTS.lock(|q| q.borrow_mut().pop())
}

/// Wait until an event is available
pub async fn wait_next_event() -> Event {
    loop {
        if let Some(event) = get_next_event() {
            return event;
        }
        Timer::after_millis(1).await;
    }
}

/// Inject an event (auto-repeat synthesizes button presses this way)
pub fn push_event(event: Event) {
    EVENTS.lock(|q| q.borrow_mut().push(event));
}

/// Drop all pending events
pub fn clear_events() {
    EVENTS.lock(|q| q.borrow_mut().clear());
}
