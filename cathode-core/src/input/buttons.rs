//! Button debouncing, press classification and chord recognition
//!
//! [`ButtonScanner::scan`] is called once per tick with the raw pressed
//! bitmap (1 = pressed, inversion already applied). Per button it keeps a
//! saturating down-tick counter and derives latched bitmaps:
//!
//! - `pressed` - latched when a button has been down for [`SHORT_TICKS`]
//! - `long` - latched when it has been down for [`LONG_TICKS`]
//! - `released` - latched when a debounced button goes up
//! - `short` - latched on release before [`LONG_TICKS`]
//!
//! plus `chord`, the whole raw pattern latched once it has been stable for
//! [`CHORD_TICKS`]. Latches are consumed with the `take_*` accessors;
//! `read_*` variants peek without clearing.

use crate::config::ms_to_ticks;

/// Number of scanned inputs (six panel buttons plus the two knob pushes)
pub const BUTTON_COUNT: usize = 8;

/// Down time at which a press is debounced and latched (50 ms)
pub const SHORT_TICKS: u16 = ms_to_ticks(50);

/// Down time at which a press qualifies as long (1 s)
pub const LONG_TICKS: u16 = ms_to_ticks(1000);

/// Stable-pattern time at which a chord is latched (750 ms)
pub const CHORD_TICKS: u16 = ms_to_ticks(750);

/// Per-tick button scanner and event latch bank
pub struct ButtonScanner {
    enabled: bool,
    /// Raw state from the most recent scan
    state: u8,
    /// Raw state from the scan before that
    previous: u8,
    /// Debounced (non-latched) pressed bitmap
    debounced: u8,
    /// Latched bitmaps, set here and cleared by `take_*`
    pressed: u8,
    released: u8,
    short: u8,
    long: u8,
    chord: u8,
    /// Ticks the raw pattern has been unchanged, saturating
    stable: u16,
    /// Per-button down time in ticks, saturating
    down_ticks: [u16; BUTTON_COUNT],
}

impl ButtonScanner {
    pub const fn new() -> Self {
        Self {
            enabled: true,
            state: 0,
            previous: 0,
            debounced: 0,
            pressed: 0,
            released: 0,
            short: 0,
            long: 0,
            chord: 0,
            stable: 0,
            down_ticks: [0; BUTTON_COUNT],
        }
    }

    /// Clear every latch, counter and state register, leaving scanning
    /// enabled
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Enable or disable scanning; while disabled, [`scan`](Self::scan)
    /// is a no-op
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Process one tick's worth of input
    ///
    /// `raw` has one bit per button, 1 = pressed.
    pub fn scan(&mut self, raw: u8) {
        if !self.enabled {
            return;
        }

        self.state = raw;

        // Chord qualification: the whole pattern must sit unchanged for
        // CHORD_TICKS. Latched exactly once per stable stretch.
        if raw == self.previous {
            if self.stable != u16::MAX {
                self.stable += 1;
            }
            if self.stable == CHORD_TICKS {
                self.chord = raw;
            }
        } else {
            self.stable = 0;
        }

        for index in 0..BUTTON_COUNT {
            let mask = 1u8 << index;
            let down = &mut self.down_ticks[index];

            if raw & mask != 0 {
                if *down != u16::MAX {
                    *down += 1;
                    if *down == SHORT_TICKS {
                        // Debounced: this is the moment a press registers
                        self.pressed |= mask;
                        self.debounced |= mask;
                    } else if *down == LONG_TICKS {
                        self.long |= mask;
                    }
                }
            } else {
                if *down >= SHORT_TICKS {
                    self.released |= mask;
                    self.debounced &= !mask;
                    if *down < LONG_TICKS {
                        self.short |= mask;
                    }
                }
                *down = 0;
            }
        }

        self.previous = raw;
    }

    /// Instantaneous (un-debounced) pressed bitmap
    pub fn read_state(&self) -> u8 {
        self.state
    }

    /// Debounced pressed bitmap; tracks the buttons, not latched
    pub fn read_debounced(&self) -> u8 {
        self.debounced
    }

    /// Peek at the pressed latch
    pub fn read_pressed(&self) -> u8 {
        self.pressed
    }

    /// Consume the pressed latch
    pub fn take_pressed(&mut self) -> u8 {
        core::mem::take(&mut self.pressed)
    }

    /// Peek at the released latch
    pub fn read_released(&self) -> u8 {
        self.released
    }

    /// Consume the released latch
    pub fn take_released(&mut self) -> u8 {
        core::mem::take(&mut self.released)
    }

    /// Peek at the short-press latch
    pub fn read_short(&self) -> u8 {
        self.short
    }

    /// Consume the short-press latch
    pub fn take_short(&mut self) -> u8 {
        core::mem::take(&mut self.short)
    }

    /// Peek at the long-press latch
    pub fn read_long(&self) -> u8 {
        self.long
    }

    /// Consume the long-press latch
    pub fn take_long(&mut self) -> u8 {
        core::mem::take(&mut self.long)
    }

    /// Peek at the chord latch
    ///
    /// A newly qualified chord overwrites an unread one.
    pub fn read_chord(&self) -> u8 {
        self.chord
    }

    /// Consume the chord latch
    pub fn take_chord(&mut self) -> u8 {
        core::mem::take(&mut self.chord)
    }
}

impl Default for ButtonScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_n(scanner: &mut ButtonScanner, raw: u8, ticks: u16) {
        for _ in 0..ticks {
            scanner.scan(raw);
        }
    }

    #[test]
    fn test_short_press_and_release() {
        let mut scanner = ButtonScanner::new();

        // Below the debounce threshold nothing registers
        scan_n(&mut scanner, 0x01, SHORT_TICKS - 1);
        assert_eq!(scanner.read_pressed(), 0);
        assert_eq!(scanner.read_debounced(), 0);

        scanner.scan(0x01);
        assert_eq!(scanner.take_pressed(), 0x01);
        assert_eq!(scanner.read_debounced(), 0x01);

        scanner.scan(0x00);
        assert_eq!(scanner.take_released(), 0x01);
        assert_eq!(scanner.take_short(), 0x01);
        assert_eq!(scanner.take_long(), 0);
        assert_eq!(scanner.read_debounced(), 0);
    }

    #[test]
    fn test_bounce_is_rejected() {
        let mut scanner = ButtonScanner::new();
        for _ in 0..10 {
            scanner.scan(0x02);
            scanner.scan(0x00);
        }
        assert_eq!(scanner.read_pressed(), 0);
        assert_eq!(scanner.read_released(), 0);
    }

    #[test]
    fn test_long_press_is_not_short() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x01, LONG_TICKS);
        assert_eq!(scanner.take_pressed(), 0x01);
        assert_eq!(scanner.take_long(), 0x01);

        scanner.scan(0x00);
        assert_eq!(scanner.take_released(), 0x01);
        assert_eq!(scanner.take_short(), 0);
    }

    #[test]
    fn test_latch_monotonicity_over_one_press() {
        // One continuous press latches `pressed` once, then exactly one of
        // short/long, then `released` once
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x01, SHORT_TICKS + 5);
        assert_eq!(scanner.take_pressed(), 0x01);
        scan_n(&mut scanner, 0x01, 100);
        assert_eq!(scanner.take_pressed(), 0, "pressed latched twice");

        scanner.scan(0x00);
        assert_eq!(scanner.take_released(), 0x01);
        assert_eq!(scanner.take_short() != 0, scanner.read_long() == 0);
        scanner.scan(0x00);
        assert_eq!(scanner.take_released(), 0);
    }

    #[test]
    fn test_down_counter_saturates() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x01, u16::MAX);
        scan_n(&mut scanner, 0x01, 100);
        scanner.scan(0x00);
        // Still classified as a (long) press and released exactly once
        assert_eq!(scanner.take_long(), 0x01);
        assert_eq!(scanner.take_released(), 0x01);
    }

    #[test]
    fn test_chord_requires_stability() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x21, CHORD_TICKS - 1);
        assert_eq!(scanner.read_chord(), 0);

        // Pattern change resets the stability clock
        scanner.scan(0x01);
        scan_n(&mut scanner, 0x21, CHORD_TICKS);
        assert_eq!(scanner.read_chord(), 0);

        scanner.scan(0x21);
        assert_eq!(scanner.take_chord(), 0x21);
        assert_eq!(scanner.read_chord(), 0);
    }

    #[test]
    fn test_new_chord_overwrites_unread_one() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x03, CHORD_TICKS + 1);
        scanner.scan(0x0C);
        scan_n(&mut scanner, 0x0C, CHORD_TICKS);
        assert_eq!(scanner.take_chord(), 0x0C);
    }

    #[test]
    fn test_independent_buttons() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x05, SHORT_TICKS);
        assert_eq!(scanner.take_pressed(), 0x05);

        // Release only one of the two
        scanner.scan(0x04);
        assert_eq!(scanner.take_released(), 0x01);
        assert_eq!(scanner.read_debounced(), 0x04);
    }

    #[test]
    fn test_disabled_scanner_ignores_input() {
        let mut scanner = ButtonScanner::new();
        scanner.set_enabled(false);
        scan_n(&mut scanner, 0xFF, LONG_TICKS);
        assert_eq!(scanner.read_pressed(), 0);
        assert_eq!(scanner.read_state(), 0);

        scanner.set_enabled(true);
        scan_n(&mut scanner, 0x01, SHORT_TICKS);
        assert_eq!(scanner.read_pressed(), 0x01);
    }

    #[test]
    fn test_reset_clears_latches() {
        let mut scanner = ButtonScanner::new();
        scan_n(&mut scanner, 0x01, LONG_TICKS);
        scanner.reset();
        assert_eq!(scanner.read_pressed(), 0);
        assert_eq!(scanner.read_long(), 0);
        assert_eq!(scanner.read_debounced(), 0);
    }
}
