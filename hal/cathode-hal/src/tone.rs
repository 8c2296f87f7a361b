//! Tone generator trait
//!
//! The beeper is modeled after a toggle-on-compare hardware timer: the
//! output pin flips on every compare match, so one full audio cycle is two
//! matches and
//!
//! ```text
//! f_out = TONE_CLOCK_HZ / prescale / (period + 1) / 2
//! ```
//!
//! The music player picks `(period, prescale)` pairs from a table computed
//! at build time against [`TONE_CLOCK_HZ`]; implementations on chips with a
//! different timer clock rescale internally.

/// Reference clock the note table is computed against
pub const TONE_CLOCK_HZ: u32 = 16_000_000;

/// Tone timer prescaler selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescale {
    /// Timer stopped (silence)
    Stop,
    /// Reference clock / 1
    Div1,
    /// Reference clock / 8
    Div8,
    /// Reference clock / 64
    Div64,
    /// Reference clock / 256
    Div256,
    /// Reference clock / 1024
    Div1024,
}

impl Prescale {
    /// Division factor, or 0 for [`Prescale::Stop`]
    pub const fn divisor(self) -> u32 {
        match self {
            Prescale::Stop => 0,
            Prescale::Div1 => 1,
            Prescale::Div8 => 8,
            Prescale::Div64 => 64,
            Prescale::Div256 => 256,
            Prescale::Div1024 => 1024,
        }
    }
}

/// Hardware tone generator
pub trait ToneGenerator {
    /// Program the tone timer
    ///
    /// [`Prescale::Stop`] halts the timer and silences the output; the
    /// period is then ignored.
    fn set_period(&mut self, period: u16, prescale: Prescale);

    /// Mute or un-mute the output without touching the timer
    fn set_mute(&mut self, mute: bool);

    /// Set output gain, 0 (quietest) to 7
    ///
    /// Designs without volume hardware may ignore this.
    fn set_gain(&mut self, gain: u8);
}
