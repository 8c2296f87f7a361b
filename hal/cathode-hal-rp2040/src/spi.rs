//! SPI master for the display driver cascade

use embassy_rp::spi::{Blocking, Config, Instance, Phase, Polarity, Spi};

use cathode_hal::spi::SpiBus;

/// SPI configuration for the high-voltage shift registers: mode 2
/// (CPOL=1, CPHA=0), 2 MHz
pub fn driver_spi_config() -> Config {
    let mut config = Config::default();
    config.frequency = 2_000_000;
    config.polarity = Polarity::IdleHigh;
    config.phase = Phase::CaptureOnFirstTransition;
    config
}

/// Blocking SPI master
pub struct RpSpi<'d, T: Instance> {
    inner: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    pub fn new(inner: Spi<'d, T, Blocking>) -> Self {
        Self { inner }
    }
}

impl<T: Instance> SpiBus for RpSpi<'_, T> {
    type Error = embassy_rp::spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data)
    }
}
