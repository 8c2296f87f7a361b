//! RP2040-specific HAL for the Nixie clock firmware
//!
//! Production implementations of the `cathode-hal` traits on Embassy-RP:
//!
//! - GPIO wrappers for buttons, encoder channels and control lines
//! - SPI + latch/enable pins as the display driver bus
//! - A PWM slice as the tone generator
//! - Buffered UART as the serial byte link

#![no_std]

pub mod display;
pub mod gpio;
pub mod spi;
pub mod tone;
pub mod uart;

// Re-export shared traits from cathode-hal for convenience
pub use cathode_hal::{DisplayBus, InputPin, OutputPin, SpiBus, ToneGenerator, UartRx, UartTx};
