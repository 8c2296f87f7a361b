//! Serial pump
//!
//! Bridges the `SerialPort` rings to the buffered UART once per
//! millisecond - comfortably ahead of 38400 baud (~4 bytes/ms) against a
//! 16-byte ring. Plays the role the UART interrupts play in a bare-metal
//! build; the polled fallback is the same loop over the `try_*` HAL
//! calls.

#[cfg(feature = "defmt")]
use defmt::warn;
use embassy_time::Timer;

use cathode_hal::uart::{UartRx, UartTx};
use cathode_hal_rp2040::uart::{RpUartRx, RpUartTx};

use crate::shared::SERIAL;

#[embassy_executor::task]
pub async fn serial_task(mut tx: RpUartTx<'static>, mut rx: RpUartRx<'static>) {
    loop {
        // Drain pending transmit bytes onto the wire
        while let Some(byte) = SERIAL.lock(|p| p.borrow_mut().pop_tx()) {
            if tx.write_blocking(&[byte]).is_err() {
                #[cfg(feature = "defmt")]
                warn!("serial tx error");
                break;
            }
        }

        // Pull received bytes into the ring
        loop {
            match rx.try_read_byte() {
                Ok(Some(byte)) => SERIAL.lock(|p| p.borrow_mut().push_rx(byte)),
                Ok(None) => break,
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    warn!("serial rx error");
                    break;
                }
            }
        }

        let overruns = SERIAL.lock(|p| p.borrow_mut().take_rx_overruns());
        if overruns > 0 {
            #[cfg(feature = "defmt")]
            warn!("serial rx overrun, {} bytes dropped", overruns);
        }

        Timer::after_millis(1).await;
    }
}
