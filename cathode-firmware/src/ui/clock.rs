//! The main clock display loop
//!
//! Renders the current view into the secondary stream and crossfades the
//! physical display toward it, then waits for input:
//!
//! - button 0 toggles between the date view and the clock
//! - button 5 toggles 12/24-hour mode (briefly showing `12` or `24`)
//! - button 1 held long enters terminal mode
//! - right knob held long enters the editor for the current view

use core::fmt::Write;

use embassy_time::Timer;

use cathode_core::display::DisplayStream;
use cathode_core::event::Button;

use super::set_date::set_date;
use super::set_time::set_time;
use super::terminal::terminal_mode;
use super::{crossfade_to, Mode};
use crate::events::wait_next_event;
use crate::shared::{BANK, CLOCK, PRIMARY, REFRESH, SECONDARY};

pub async fn clock_display(
    primary: &mut DisplayStream<'static>,
    secondary: &mut DisplayStream<'static>,
) -> ! {
    secondary.write_byte(0x0C);

    BANK.show(PRIMARY);
    REFRESH.set_crossfade_rate(1);

    let mut display_mode = Mode::Clock24;
    let mut clock_mode = Mode::Clock24;

    loop {
        // Future alarm annunciator: aux B held off for now
        let alarm = 'y';

        match display_mode {
            Mode::Clock12 => {
                let (time, pm) = CLOCK.lock(|c| c.borrow().time_12());
                let ampm = if pm { 'X' } else { 'x' };
                let _ = write!(
                    secondary,
                    "\r~{:2}.{:02}.{:02}{}{}",
                    time.hour, time.minute, time.second, ampm, alarm
                );
            }
            Mode::Clock24 => {
                let time = CLOCK.lock(|c| c.borrow().time());
                let _ = write!(
                    secondary,
                    "\r~x{:02}.{:02}.{:02}{}",
                    time.hour, time.minute, time.second, alarm
                );
            }
            Mode::Date => {
                let date = CLOCK.lock(|c| c.borrow().date());
                let _ = write!(
                    secondary,
                    "\r~`x{:02}{:02}{:02}{}",
                    date.month,
                    date.day,
                    date.year % 100,
                    alarm
                );
            }
        }

        crossfade_to(SECONDARY).await;

        let event = wait_next_event().await;

        if event.is_pressed(Button::B0) {
            display_mode = if display_mode == Mode::Date {
                clock_mode
            } else {
                Mode::Date
            };
        } else if event.is_pressed(Button::B5) {
            if display_mode != Mode::Date {
                clock_mode = if clock_mode == Mode::Clock12 {
                    let _ = write!(secondary, "\x0c  24");
                    Mode::Clock24
                } else {
                    let _ = write!(secondary, "\x0c  12");
                    Mode::Clock12
                };
                crossfade_to(SECONDARY).await;
                Timer::after_millis(500).await;
            }
            display_mode = clock_mode;
        } else if event.is_long(Button::B1) {
            terminal_mode(primary).await;
        } else if event.is_long(Button::RightKnob) {
            if display_mode == Mode::Date {
                let mut date = CLOCK.lock(|c| c.borrow().date());
                if set_date(primary, &mut date).await {
                    CLOCK.lock(|c| c.borrow_mut().set_date(date));
                }
            } else {
                let mut time = CLOCK.lock(|c| c.borrow().time());
                if set_time(primary, clock_mode, &mut time).await {
                    CLOCK.lock(|c| c.borrow_mut().set_time(time));
                }
            }
        }
    }
}
