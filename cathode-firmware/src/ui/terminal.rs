//! Terminal mode
//!
//! Received serial bytes are echoed back and written straight into the
//! primary display stream, so the whole character-stream grammar is
//! drivable from a terminal. Exits on ESC or a press of button 1.

use embassy_time::Timer;

use cathode_core::display::DisplayStream;
use cathode_core::event::Button;

use crate::console;
use crate::events::get_next_event;

const ESC: u8 = 0x1B;

pub async fn terminal_mode(primary: &mut DisplayStream<'static>) {
    console::print("\r\nTerminal mode ready.\r\n").await;

    // Partial-reset the stream, then clear it
    primary.write_bytes(b"\x0b\x0c");

    loop {
        if let Some(event) = get_next_event() {
            if event.is_pressed(Button::B1) {
                break;
            }
        }

        match console::read_byte() {
            Some(ESC) => break,
            Some(byte) => {
                console::write_byte(byte).await;
                primary.write_byte(byte);
            }
            None => Timer::after_millis(1).await,
        }
    }

    console::print("\r\nTerminal mode exit\r\n").await;
    primary.write_byte(0x0B);
}
