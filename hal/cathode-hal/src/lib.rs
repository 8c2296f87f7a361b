//! Cathode Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the clock firmware is written
//! against. Each trait has one production implementation in a chip-specific
//! HAL crate (currently `cathode-hal-rp2040`) and one recording test double
//! in the test code of whatever crate consumes it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cathode-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cathode-core (tick-driven logic)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cathode-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cathode-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`display::DisplayBus`] - Latched 64-bit cathode driver cascade
//! - [`tone::ToneGenerator`] - Toggle-on-compare tone timer

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
pub mod spi;
pub mod tone;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use display::{DisplayBus, FRAME_BYTES};
pub use gpio::{InputPin, OutputPin};
pub use spi::SpiBus;
pub use tone::{Prescale, ToneGenerator};
pub use uart::{UartRx, UartTx};
