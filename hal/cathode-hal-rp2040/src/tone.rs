//! PWM-based tone generator
//!
//! The note table speaks in (period, prescale) pairs against a 16 MHz
//! toggle-on-compare timer; the RP2040 has no such timer, so this driver
//! converts each pair to the equivalent output frequency and programs a
//! PWM slice to produce it. The divider is chosen per note so the 16-bit
//! TOP fits even for the lowest octave. Gain scales the duty cycle,
//! which on a piezo makes a usable volume control.

use embassy_rp::pwm::{Config, Pwm};
use fixed::traits::ToFixed;

use cathode_hal::tone::{Prescale, ToneGenerator, TONE_CLOCK_HZ};

/// RP2040 system clock feeding the PWM slices
const SYS_CLOCK_HZ: u64 = 125_000_000;

/// Tone generator on one PWM slice
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    muted: bool,
    gain: u8,
    /// Active pitch, kept so un-muting can restore it
    current: Option<(u16, Prescale)>,
}

impl<'d> PwmTone<'d> {
    /// Wrap a PWM slice configured for output on channel A
    pub fn new(pwm: Pwm<'d>) -> Self {
        let mut tone = Self {
            pwm,
            muted: false,
            gain: 5,
            current: None,
        };
        tone.silence();
        tone
    }

    fn silence(&mut self) {
        let mut config = Config::default();
        config.enable = false;
        config.compare_a = 0;
        self.pwm.set_config(&config);
    }

    fn program(&mut self, period: u16, prescale: Prescale) {
        let divisor = prescale.divisor() as u64;
        if divisor == 0 {
            self.silence();
            return;
        }

        // Target frequency in centihertz from the compare-timer model
        let freq_chz = TONE_CLOCK_HZ as u64 * 100 / divisor / (period as u64 + 1) / 2;
        if freq_chz == 0 {
            self.silence();
            return;
        }

        // Smallest power-of-two divider whose TOP fits in 16 bits
        let mut divider: u64 = 1;
        let mut top = SYS_CLOCK_HZ * 100 / freq_chz;
        while top > 0x1_0000 && divider < 128 {
            divider *= 2;
            top = SYS_CLOCK_HZ * 100 / (divider * freq_chz);
        }
        let top = (top.clamp(2, 0x1_0000) - 1) as u16;

        let mut config = Config::default();
        config.top = top;
        config.divider = (divider as u16).to_fixed();
        config.compare_a = self.level(top);
        config.enable = true;
        self.pwm.set_config(&config);
    }

    /// Compare level for the current gain: gain 7 is a square wave,
    /// lower gains narrow the pulse
    fn level(&self, top: u16) -> u16 {
        if self.muted {
            return 0;
        }
        (top as u32 / 2 * (self.gain as u32 + 1) / 8) as u16
    }

    fn reprogram(&mut self) {
        match self.current {
            Some((period, prescale)) => self.program(period, prescale),
            None => self.silence(),
        }
    }
}

impl ToneGenerator for PwmTone<'_> {
    fn set_period(&mut self, period: u16, prescale: Prescale) {
        if prescale == Prescale::Stop {
            self.current = None;
            self.silence();
        } else {
            self.current = Some((period, prescale));
            self.program(period, prescale);
        }
    }

    fn set_mute(&mut self, mute: bool) {
        if self.muted != mute {
            self.muted = mute;
            self.reprogram();
        }
    }

    fn set_gain(&mut self, gain: u8) {
        self.gain = gain.min(7);
        self.reprogram();
    }
}
