//! Nixie display engine
//!
//! Layered bottom-up:
//!
//! - [`layout`] - the fixed wiring of segments to driver outputs
//! - [`buffer`] - shared segment intensity buffers and the active binding
//! - [`refresh`] - the per-tick PWM sub-cycle that feeds the driver bus
//! - [`stream`] - the character-stream protocol over a buffer
//! - [`crossfade`] - PWM-cycle-synchronized animation between buffers

pub mod buffer;
pub mod crossfade;
pub mod layout;
pub mod refresh;
pub mod stream;

pub use buffer::{DisplayBank, SegmentBuffer};
pub use crossfade::Crossfade;
pub use refresh::{RefreshControl, RefreshEngine};
pub use stream::DisplayStream;
