//! Display driver bus trait
//!
//! The Nixie cathodes hang off a cascade of high-voltage shift registers:
//! 64 bits are clocked in serially, then a rising edge on the latch line
//! transfers them to the outputs. A separate output-enable line blanks the
//! whole cascade.
//!
//! Bit `i` of the 64-bit stream (0 = first shifted) drives segment index
//! `i`, so `frame[i / 8]` carries segment `i` at bit `7 - (i % 8)` and the
//! frame is shifted MSb-first.

/// Bytes per driver frame (64 segment bits)
pub const FRAME_BYTES: usize = 8;

/// Latched serial driver cascade for the tube cathodes
pub trait DisplayBus {
    /// Error type for bus operations
    type Error;

    /// Shift out one full 64-bit frame and pulse the latch
    ///
    /// Returns once the outputs have been latched, so the caller may
    /// mutate its frame buffer immediately afterwards.
    fn shift_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), Self::Error>;

    /// Drive the output-enable line
    ///
    /// Disabling blanks the display regardless of latched data.
    fn set_output_enable(&mut self, enabled: bool);
}
