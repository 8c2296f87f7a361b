//! Display driver bus: SPI shift + latch pulse + output enable
//!
//! The cascade latches shifted data on a rising edge of the latch line;
//! a separate enable line blanks all outputs. Composed from the HAL
//! traits so any SPI master and pin pair will do.

use cathode_hal::display::{DisplayBus, FRAME_BYTES};
use cathode_hal::gpio::OutputPin;
use cathode_hal::spi::SpiBus;

/// Latched shift-register cascade behind an SPI master
pub struct ShiftRegisterBus<S, L, E> {
    spi: S,
    latch: L,
    enable: E,
}

impl<S, L, E> ShiftRegisterBus<S, L, E>
where
    S: SpiBus,
    L: OutputPin,
    E: OutputPin,
{
    /// Take ownership of the bus pins; latch idles low, outputs blanked
    /// until enabled
    pub fn new(spi: S, mut latch: L, mut enable: E) -> Self {
        latch.set_low();
        enable.set_low();
        Self { spi, latch, enable }
    }
}

impl<S, L, E> DisplayBus for ShiftRegisterBus<S, L, E>
where
    S: SpiBus,
    L: OutputPin,
    E: OutputPin,
{
    type Error = S::Error;

    fn shift_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), Self::Error> {
        self.spi.write(frame)?;
        self.latch.set_high();
        self.latch.set_low();
        Ok(())
    }

    fn set_output_enable(&mut self, enabled: bool) {
        self.enable.set_state(enabled);
    }
}
