//! Events and the scan stage that produces them
//!
//! Input sources (button latches, rotary counters, timer flags, the 1 Hz
//! pulse) are drained into an [`EventQueue`] the application consumes.
//! One drain pass emits, in fixed order: per-button events (pressed,
//! released, short, long for button 0 upward), then chord, then right and
//! left rotary deltas, then timer expirations.

pub mod queue;
pub mod timers;

pub use queue::EventQueue;
pub use timers::{TimerId, TimerPool};

use crate::input::{ButtonScanner, QuadratureDecoder};

/// The eight scanned inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    /// Push switch of the left rotary encoder
    LeftKnob,
    /// Push switch of the right rotary encoder
    RightKnob,
}

impl Button {
    /// Buttons in scan order (bit 0 upward)
    pub const ALL: [Button; 8] = [
        Button::B0,
        Button::B1,
        Button::B2,
        Button::B3,
        Button::B4,
        Button::B5,
        Button::LeftKnob,
        Button::RightKnob,
    ];

    /// Bit index in the scanner bitmaps
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Bitmap mask for this button
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }
}

/// Phases of a button's life, in the order they are scanned out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Debounced press registered
    Pressed,
    /// Debounced button went up
    Released,
    /// Released before the long-press threshold
    Short,
    /// Held past the long-press threshold
    Long,
}

impl ButtonAction {
    /// Scan-out order; keeps each button's events contiguous in the queue
    pub const ALL: [ButtonAction; 4] = [
        ButtonAction::Pressed,
        ButtonAction::Released,
        ButtonAction::Short,
        ButtonAction::Long,
    ];
}

/// One queued input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A single button changed phase; `held` is the debounced bitmap at
    /// scan time
    Button {
        button: Button,
        action: ButtonAction,
        held: u8,
    },
    /// A multi-button pattern sat stable past the chord delay
    Chord(u8),
    /// Left encoder moved; signed accumulated detents
    LeftRotary(i8),
    /// Right encoder moved; signed accumulated detents
    RightRotary(i8),
    /// A software event timer fired
    TimerExpired(TimerId),
    /// The 1 Hz pulse from the tick driver
    SecondElapsed,
}

impl Event {
    /// Any button or chord event
    pub fn is_button(&self) -> bool {
        matches!(self, Event::Button { .. } | Event::Chord(_))
    }

    /// Convenience: a press of a specific button
    pub fn is_pressed(&self, which: Button) -> bool {
        matches!(
            self,
            Event::Button { button, action: ButtonAction::Pressed, .. } if *button == which
        )
    }

    /// Convenience: a long press of a specific button
    pub fn is_long(&self, which: Button) -> bool {
        matches!(
            self,
            Event::Button { button, action: ButtonAction::Long, .. } if *button == which
        )
    }

    /// Either encoder moved
    pub fn is_rotary(&self) -> bool {
        matches!(self, Event::LeftRotary(_) | Event::RightRotary(_))
    }

    /// Timer or 1 Hz event
    pub fn is_timer(&self) -> bool {
        matches!(self, Event::TimerExpired(_) | Event::SecondElapsed)
    }
}

/// One drained snapshot of all event sources
///
/// Collecting is destructive on the sources (latches cleared, counters
/// swapped with zero), so each snapshot owns its slice of history. The
/// firmware collects under per-resource critical sections and dispatches
/// into the queue afterwards, keeping every locked region minimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub pressed: u8,
    pub released: u8,
    pub short: u8,
    pub long: u8,
    pub held: u8,
    pub chord: u8,
    pub left: i8,
    pub right: i8,
    pub expired: u8,
}

impl InputSnapshot {
    /// Drain all sources into a snapshot
    pub fn collect(
        buttons: &mut ButtonScanner,
        left: &mut QuadratureDecoder,
        right: &mut QuadratureDecoder,
        timers: &mut TimerPool,
    ) -> Self {
        Self {
            pressed: buttons.take_pressed(),
            released: buttons.take_released(),
            short: buttons.take_short(),
            long: buttons.take_long(),
            held: buttons.read_debounced(),
            chord: buttons.take_chord(),
            left: left.take_relative(),
            right: right.take_relative(),
            expired: timers.take_status(),
        }
    }

    /// Turn the snapshot into queued events, in the canonical order
    pub fn dispatch(&self, queue: &mut EventQueue) {
        for button in Button::ALL {
            let mask = button.mask();
            for action in ButtonAction::ALL {
                let latched = match action {
                    ButtonAction::Pressed => self.pressed,
                    ButtonAction::Released => self.released,
                    ButtonAction::Short => self.short,
                    ButtonAction::Long => self.long,
                };
                if latched & mask != 0 {
                    queue.push(Event::Button {
                        button,
                        action,
                        held: self.held,
                    });
                }
            }
        }

        if self.chord != 0 {
            queue.push(Event::Chord(self.chord));
        }
        if self.right != 0 {
            queue.push(Event::RightRotary(self.right));
        }
        if self.left != 0 {
            queue.push(Event::LeftRotary(self.left));
        }

        let mut expired = self.expired;
        let mut id: TimerId = 0;
        while expired != 0 {
            if expired & 1 != 0 {
                queue.push(Event::TimerExpired(id));
            }
            id += 1;
            expired >>= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::buttons::SHORT_TICKS;

    #[test]
    fn test_dispatch_order_is_canonical() {
        let snap = InputSnapshot {
            pressed: 0x02,
            released: 0x02,
            short: 0,
            long: 0,
            held: 0x02,
            chord: 0x21,
            left: -1,
            right: 3,
            expired: 0b0000_0101,
        };
        let mut queue = EventQueue::new();
        snap.dispatch(&mut queue);

        assert_eq!(
            queue.pop(),
            Some(Event::Button {
                button: Button::B1,
                action: ButtonAction::Pressed,
                held: 0x02
            })
        );
        assert_eq!(
            queue.pop(),
            Some(Event::Button {
                button: Button::B1,
                action: ButtonAction::Released,
                held: 0x02
            })
        );
        assert_eq!(queue.pop(), Some(Event::Chord(0x21)));
        assert_eq!(queue.pop(), Some(Event::RightRotary(3)));
        assert_eq!(queue.pop(), Some(Event::LeftRotary(-1)));
        assert_eq!(queue.pop(), Some(Event::TimerExpired(0)));
        assert_eq!(queue.pop(), Some(Event::TimerExpired(2)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_collect_drains_the_sources() {
        let mut buttons = ButtonScanner::new();
        let mut left = QuadratureDecoder::new();
        let mut right = QuadratureDecoder::new();
        let mut timers = TimerPool::new();

        for _ in 0..SHORT_TICKS {
            buttons.scan(0x01);
        }
        left.update(true, true);
        let id = timers.start(1, false).unwrap();
        timers.tick();

        let snap = InputSnapshot::collect(&mut buttons, &mut left, &mut right, &mut timers);
        assert_eq!(snap.pressed, 0x01);
        assert_eq!(snap.held, 0x01);
        assert_eq!(snap.left, 1);
        assert_eq!(snap.right, 0);
        assert_eq!(snap.expired, 1 << id);

        // Second collect finds nothing new
        let snap = InputSnapshot::collect(&mut buttons, &mut left, &mut right, &mut timers);
        assert_eq!(snap.pressed, 0);
        assert_eq!(snap.left, 0);
        assert_eq!(snap.expired, 0);
    }

    #[test]
    fn test_knob_buttons_map_to_high_bits() {
        let snap = InputSnapshot {
            pressed: Button::LeftKnob.mask() | Button::RightKnob.mask(),
            held: 0xC0,
            ..Default::default()
        };
        let mut queue = EventQueue::new();
        snap.dispatch(&mut queue);

        assert!(queue.pop().unwrap().is_pressed(Button::LeftKnob));
        assert!(queue.pop().unwrap().is_pressed(Button::RightKnob));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_event_classification() {
        assert!(Event::Chord(3).is_button());
        assert!(Event::LeftRotary(1).is_rotary());
        assert!(Event::RightRotary(-1).is_rotary());
        assert!(Event::TimerExpired(0).is_timer());
        assert!(Event::SecondElapsed.is_timer());
        assert!(!Event::SecondElapsed.is_button());

        let press = Event::Button {
            button: Button::B3,
            action: ButtonAction::Pressed,
            held: 0x08,
        };
        assert!(press.is_button());
        assert!(press.is_pressed(Button::B3));
        assert!(!press.is_pressed(Button::B4));
        assert!(!press.is_long(Button::B3));
    }
}
