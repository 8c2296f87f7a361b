//! Serial console output helpers
//!
//! Writes honor the port's blocking policy: a full ring parks the caller
//! until the pump task drains a slot.

use embassy_time::Timer;

use cathode_core::serial::WriteOutcome;

use crate::shared::SERIAL;

/// Queue one byte, waiting out a full ring when blocking is enabled
pub async fn write_byte(byte: u8) {
    loop {
        match SERIAL.lock(|p| p.borrow_mut().write(byte)) {
            WriteOutcome::Queued | WriteOutcome::Dropped => return,
            WriteOutcome::WouldBlock => Timer::after_millis(1).await,
        }
    }
}

/// Queue a whole string
pub async fn print(s: &str) {
    for &byte in s.as_bytes() {
        write_byte(byte).await;
    }
}

/// Take one received byte, if any
pub fn read_byte() -> Option<u8> {
    SERIAL.lock(|p| p.borrow_mut().read())
}
