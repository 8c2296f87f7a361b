//! Compile-time tunables shared across the firmware
//!
//! All timing in the control plane is expressed in ticks of the master
//! heartbeat; [`ms_to_ticks`] does the conversion at compile time so no
//! runtime division is needed.

/// Master tick rate in Hz
///
/// Must satisfy `(MAX_INTENSITY) * 30 <= TICK_HZ` so the full PWM refresh
/// stays at or above 30 Hz.
pub const TICK_HZ: u32 = 625;

/// Serial line rate (8N1)
pub const BAUD_RATE: u32 = 38_400;

/// Serial receive ring size in bytes
pub const SERIAL_RX_LEN: usize = 16;

/// Serial transmit ring size in bytes
pub const SERIAL_TX_LEN: usize = 16;

/// Convert milliseconds to heartbeat ticks (rounds down)
pub const fn ms_to_ticks(ms: u32) -> u16 {
    (ms * TICK_HZ / 1000) as u16
}

/// Convert heartbeat ticks to milliseconds (rounds down)
pub const fn ticks_to_ms(ticks: u16) -> u32 {
    ticks as u32 * 1000 / TICK_HZ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_tick_conversion() {
        assert_eq!(ms_to_ticks(1000), TICK_HZ as u16);
        assert_eq!(ms_to_ticks(50), 31);
        assert_eq!(ms_to_ticks(200), 125);
        assert_eq!(ticks_to_ms(625), 1000);
    }
}
