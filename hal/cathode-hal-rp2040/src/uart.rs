//! Buffered UART as the serial byte link
//!
//! Wraps the Embassy buffered UART halves (interrupt-driven ring buffers
//! in the driver) behind the `cathode-hal` byte traits. The `try_*` path
//! uses the `embedded-io` readiness traits, which is what the polled
//! serial fallback and the 1 ms pump task rely on.

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error as UartHwError};
use embedded_io::{Read, ReadReady, Write, WriteReady};

use cathode_hal::uart::{UartRx, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartLinkError {
    /// Break condition on the line
    Break,
    /// Hardware FIFO overrun
    Overrun,
    /// Parity error
    Parity,
    /// Framing error
    Framing,
    /// Other driver error
    Other,
}

impl From<UartHwError> for UartLinkError {
    fn from(e: UartHwError) -> Self {
        match e {
            UartHwError::Break => UartLinkError::Break,
            UartHwError::Overrun => UartLinkError::Overrun,
            UartHwError::Parity => UartLinkError::Parity,
            UartHwError::Framing => UartLinkError::Framing,
            _ => UartLinkError::Other,
        }
    }
}

/// Transmit half
pub struct RpUartTx<'d> {
    inner: BufferedUartTx<'d>,
}

impl<'d> RpUartTx<'d> {
    pub fn new(inner: BufferedUartTx<'d>) -> Self {
        Self { inner }
    }
}

impl UartTx for RpUartTx<'_> {
    type Error = UartLinkError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut rest = data;
        while !rest.is_empty() {
            let n = self.inner.write(rest).map_err(UartLinkError::from)?;
            rest = &rest[n..];
        }
        Ok(())
    }

    fn try_write_byte(&mut self, byte: u8) -> Result<bool, Self::Error> {
        if !self.inner.write_ready().map_err(UartLinkError::from)? {
            return Ok(false);
        }
        let n = self.inner.write(&[byte]).map_err(UartLinkError::from)?;
        Ok(n == 1)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.inner).map_err(UartLinkError::from)
    }
}

/// Receive half
pub struct RpUartRx<'d> {
    inner: BufferedUartRx<'d>,
}

impl<'d> RpUartRx<'d> {
    pub fn new(inner: BufferedUartRx<'d>) -> Self {
        Self { inner }
    }
}

impl UartRx for RpUartRx<'_> {
    type Error = UartLinkError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf).map_err(UartLinkError::from)
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready().map_err(UartLinkError::from)? {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        let n = self.inner.read(&mut buf).map_err(UartLinkError::from)?;
        Ok((n == 1).then_some(buf[0]))
    }
}
