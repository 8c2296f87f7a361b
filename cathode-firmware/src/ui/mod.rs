//! Application UI: the clock display loop, the time/date editors and
//! terminal mode
//!
//! Everything here runs on the thread executor and talks to the world
//! through the event queue and the virtual display streams.

pub mod clock;
pub mod set_date;
pub mod set_time;
pub mod terminal;

use embassy_futures::yield_now;

use cathode_core::display::Crossfade;
use cathode_core::event::{Button, ButtonAction, Event};

use crate::events::push_event;
use crate::shared::{BANK, BUTTONS, REFRESH};

/// What the tubes are showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Clock12,
    Clock24,
    Date,
}

/// Blinking-field intensity characters for the editors
pub(crate) const BLINK_LOW: u8 = b'1';
pub(crate) const BLINK_HIGH: u8 = b'9';
pub(crate) const NORMAL: u8 = b'9';

/// Auto-repeat state for the editor inc/dec buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repeat {
    Off,
    On,
    /// Armed off until the chord that set it is released
    Inhibit,
}

/// Crossfade the active buffer toward one of the bank's buffers
///
/// Blocks the calling task until the fade converges; the tick keeps
/// refreshing between polls.
pub async fn crossfade_to(target: usize) {
    let mut fade = Crossfade::start(&REFRESH, BANK.buffer(target));
    while !fade.poll(&REFRESH, BANK.active()) {
        yield_now().await;
    }
}

/// One of the six panel buttons (not a knob push)?
pub(crate) fn is_panel_button(button: Button) -> bool {
    button.index() < 6
}

/// A panel-button event with the given action?
pub(crate) fn panel_action(event: &Event, wanted: ButtonAction) -> bool {
    matches!(
        event,
        Event::Button { button, action, .. }
            if *action == wanted && is_panel_button(*button)
    )
}

/// Synthesize presses for every held panel button (auto-repeat)
pub(crate) fn synthesize_repeat_presses() {
    let held = BUTTONS.lock(|b| b.borrow().read_debounced());
    for button in Button::ALL {
        if is_panel_button(button) && held & button.mask() != 0 {
            push_event(Event::Button {
                button,
                action: ButtonAction::Pressed,
                held,
            });
        }
    }
}
