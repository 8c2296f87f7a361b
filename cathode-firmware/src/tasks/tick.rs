//! The master heartbeat
//!
//! One task at 625 Hz on the interrupt executor, so it preempts
//! everything on the thread executor exactly like a hardware timer ISR.
//! Fan-out order per tick: display refresh first (bounds visual jitter),
//! then button scan, timer-pool update, player service (its tone update
//! is the least time-critical), and finally the divide-down to the 1 Hz
//! pulse that advances the clock.

#[cfg(feature = "defmt")]
use defmt::warn;
use embassy_time::{Duration, Ticker};

use cathode_core::clock::SecondsDivider;
use cathode_core::config::TICK_HZ;
use cathode_core::display::RefreshEngine;
use cathode_core::event::Event;
use cathode_hal::gpio::InputPin;
use cathode_hal_rp2040::display::ShiftRegisterBus;
use cathode_hal_rp2040::gpio::{RpInput, RpOutput};
use cathode_hal_rp2040::spi::RpSpi;
use cathode_hal_rp2040::tone::PwmTone;
use embassy_rp::peripherals::SPI0;

use crate::shared::{BANK, BUTTONS, CLOCK, EVENTS, PLAYER, REFRESH, TIMERS};

/// The display driver bus as wired on this board
pub type NixieBus = ShiftRegisterBus<RpSpi<'static, SPI0>, RpOutput<'static>, RpOutput<'static>>;

/// The eight panel inputs, scan order bit 0 upward:
/// buttons 0-5, left knob push, right knob push
pub struct ButtonInputs {
    pins: [RpInput<'static>; 8],
}

impl ButtonInputs {
    pub fn new(pins: [RpInput<'static>; 8]) -> Self {
        Self { pins }
    }

    /// Pressed bitmap; inputs are active-low (pull-ups)
    fn read(&self) -> u8 {
        let mut raw = 0;
        for (index, pin) in self.pins.iter().enumerate() {
            if pin.is_low() {
                raw |= 1 << index;
            }
        }
        raw
    }
}

/// Peripherals owned by the tick context
pub struct TickHardware {
    pub bus: NixieBus,
    pub tone: PwmTone<'static>,
    pub buttons: ButtonInputs,
}

#[embassy_executor::task]
pub async fn tick_task(mut hw: TickHardware) {
    let mut engine = RefreshEngine::new();
    let mut seconds = SecondsDivider::new();
    let mut ticker = Ticker::every(Duration::from_hz(TICK_HZ as u64));

    loop {
        ticker.next().await;

        if engine.step(&REFRESH, BANK.active(), &mut hw.bus).is_err() {
            #[cfg(feature = "defmt")]
            warn!("display bus write failed");
        }

        let raw = hw.buttons.read();
        BUTTONS.lock(|b| b.borrow_mut().scan(raw));

        TIMERS.lock(|t| t.borrow_mut().tick());

        PLAYER.lock(|p| p.borrow_mut().service(&mut hw.tone));

        if seconds.tick() {
            CLOCK.lock(|c| c.borrow_mut().tick_second());
            EVENTS.lock(|q| q.borrow_mut().push(Event::SecondElapsed));
        }
    }
}
