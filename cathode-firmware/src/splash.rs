//! Startup splash: serial banner, tube exercise, demo score
//!
//! The tube exercise marches every digit across all six tubes with
//! alternating lamp/aux patterns at the slowest crossfade rate - equal
//! parts burn-in check and showing off. It advances on the 1 Hz pulse
//! and any other input aborts it.

use core::fmt::Write;

use heapless::String;

use cathode_core::display::DisplayStream;
use cathode_core::event::Event;

use crate::console;
use crate::events::wait_next_event;
use crate::shared::{PLAYER, REFRESH, SECONDARY};
use crate::ui::crossfade_to;

/// Demo score played once at power-up
pub const DEMO_SCORE: &str = "TQ:120:M8:O4:CHGFIED>CH<GFIED>CH<GFIEFDH.";

/// Print the sign-on banner to the serial console
pub async fn sign_on() {
    let mut banner: String<64> = String::new();
    let _ = write!(
        banner,
        "\r\nCathode v{} - six tubes, one heartbeat\r\n",
        env!("CARGO_PKG_VERSION")
    );
    console::print(&banner).await;
}

/// Start the demo score on the player
pub fn start_demo_score() {
    PLAYER.lock(|p| p.borrow_mut().start(DEMO_SCORE));
}

/// Crossfade each digit 0..9 across the whole display
pub async fn display_test(secondary: &mut DisplayStream<'static>) {
    REFRESH.set_crossfade_rate(3);

    for digit in b'0'..=b'9' {
        if digit & 0x01 != 0 {
            secondary.write_bytes(b"\r`XY");
        } else {
            secondary.write_bytes(b"\r<>xy");
        }
        for _ in 0..6 {
            secondary.write_byte(digit);
        }

        crossfade_to(SECONDARY).await;

        if wait_next_event().await != Event::SecondElapsed {
            break;
        }
    }
}
