//! Process-wide singletons
//!
//! One static per shared resource, each behind a blocking critical-section
//! mutex: locking masks the tick interrupt for the duration of the
//! closure, which is the "atomic block" every multi-byte access to
//! ISR-shared state runs under. Locks are taken one at a time and held
//! only across the touch itself - never nested, never across an await.
//!
//! The display bank and refresh flags are *not* behind a mutex: their
//! cells are byte-wide atomics the refresh interrupt may read while the
//! application writes (see `cathode_core::display::buffer`).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use cathode_core::clock::WallClock;
use cathode_core::display::{DisplayBank, RefreshControl};
use cathode_core::event::{EventQueue, TimerPool};
use cathode_core::input::{ButtonScanner, QuadratureDecoder};
use cathode_core::player::Player;
use cathode_core::serial::SerialPort;

/// Buffer index of the primary virtual display
pub const PRIMARY: usize = 0;

/// Buffer index of the secondary virtual display
pub const SECONDARY: usize = 1;

/// The two segment buffers and the active binding
pub static BANK: DisplayBank<2> = DisplayBank::new();

/// Refresh engine mode flags (PWM cycle synchronization, crossfade rate)
pub static REFRESH: RefreshControl = RefreshControl::new();

type Shared<T> = Mutex<CriticalSectionRawMutex, RefCell<T>>;

/// Button scanner, written by the tick interrupt
pub static BUTTONS: Shared<ButtonScanner> = Mutex::new(RefCell::new(ButtonScanner::new()));

/// Left encoder decoder, written by the pin-edge task
pub static LEFT_ENCODER: Shared<QuadratureDecoder> =
    Mutex::new(RefCell::new(QuadratureDecoder::new()));

/// Right encoder decoder, written by the pin-edge task
pub static RIGHT_ENCODER: Shared<QuadratureDecoder> =
    Mutex::new(RefCell::new(QuadratureDecoder::new()));

/// Software event-timer pool, decremented by the tick interrupt
pub static TIMERS: Shared<TimerPool> = Mutex::new(RefCell::new(TimerPool::new()));

/// The wall clock, advanced by the 1 Hz pulse in the tick interrupt
pub static CLOCK: Shared<WallClock> = Mutex::new(RefCell::new(WallClock::new()));

/// Pending input events
pub static EVENTS: Shared<EventQueue> = Mutex::new(RefCell::new(EventQueue::new()));

/// Music player, serviced by the tick interrupt
pub static PLAYER: Shared<Player> = Mutex::new(RefCell::new(Player::new()));

/// Serial rings bridged to the UART by the pump task
pub static SERIAL: Shared<SerialPort> = Mutex::new(RefCell::new(SerialPort::new()));
