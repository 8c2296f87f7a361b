//! GPIO wrappers
//!
//! Thin newtypes over the Embassy pin drivers; the orphan rule keeps the
//! `cathode-hal` trait impls here rather than on the Embassy types
//! directly.

use embassy_rp::gpio::{Input, Output};

use cathode_hal::gpio::{InputPin, OutputPin};

/// Push-pull output pin
pub struct RpOutput<'d> {
    inner: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(inner: Output<'d>) -> Self {
        Self { inner }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.inner.set_high();
    }

    fn set_low(&mut self) {
        self.inner.set_low();
    }
}

/// Input pin
pub struct RpInput<'d> {
    inner: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(inner: Input<'d>) -> Self {
        Self { inner }
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.inner.is_high()
    }
}
