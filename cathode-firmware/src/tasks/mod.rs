//! Firmware tasks
//!
//! - [`tick`] - the 625 Hz heartbeat, runs on the interrupt executor
//! - [`rotary`] - pin-edge driven quadrature decoding
//! - [`serial`] - UART pump bridging the serial rings to the wire

pub mod rotary;
pub mod serial;
pub mod tick;

pub use rotary::rotary_task;
pub use serial::serial_task;
pub use tick::{tick_task, ButtonInputs, TickHardware};
