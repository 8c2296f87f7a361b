//! Interactive time editor
//!
//! Thin shell over [`TimeEditor`]: this side owns the blink timer, the
//! auto-repeat timer and the rendering; the state machine owns the value
//! and the field cursor. The selected field blinks between low and high
//! intensity on a 200 ms event timer; holding an adjust button long arms
//! a 100 ms auto-repeat that synthesizes presses until release. Chords
//! zero fields: 0+1 hours, 2+3 minutes, 4+5 seconds, 0+5 the whole time.
//!
//! Right knob press accepts and returns `true`; left knob press cancels.

use core::fmt::Write;

use cathode_core::clock::{hour_24_to_12, Time};
use cathode_core::config::ms_to_ticks;
use cathode_core::display::DisplayStream;
use cathode_core::editor::{EditorAction, TimeEditor, TimeField};
use cathode_core::event::{ButtonAction, Event};

use super::{panel_action, Mode, Repeat, BLINK_HIGH, BLINK_LOW, NORMAL};
use crate::events::wait_next_event;
use crate::shared::TIMERS;

/// Run the editor over `time`; returns whether the result should be
/// applied
pub async fn set_time(primary: &mut DisplayStream<'static>, mode: Mode, time: &mut Time) -> bool {
    let mut editor = TimeEditor::new(*time);
    let mut blink = BLINK_LOW;
    let mut refresh = true;
    let mut repeat = Repeat::Off;

    let blink_timer = TIMERS.lock(|t| t.borrow_mut().start(ms_to_ticks(200), true));
    let repeat_timer = TIMERS.lock(|t| t.borrow_mut().start(ms_to_ticks(100), true));

    let accepted = loop {
        if refresh {
            refresh = false;
            let field = editor.selected();
            let value = editor.time();
            let hi = if field == TimeField::Hours { blink } else { NORMAL } as char;
            let mi = if field == TimeField::Minutes { blink } else { NORMAL } as char;
            let si = if field == TimeField::Seconds { blink } else { NORMAL } as char;
            let (hour, ampm) = match mode {
                Mode::Clock12 => {
                    let (hour, pm) = hour_24_to_12(value.hour);
                    (hour, if pm { 'X' } else { 'x' })
                }
                _ => (value.hour, 'x'),
            };
            let _ = write!(
                primary,
                "\r*{}{:2}~.*{}{:02}~.*{}{:02}*{}{}",
                hi, hour, mi, value.minute, si, value.second, hi, ampm
            );
        }

        let event = wait_next_event().await;

        match event {
            Event::TimerExpired(id) if Some(id) == blink_timer => {
                blink = if blink == BLINK_LOW { BLINK_HIGH } else { BLINK_LOW };
                refresh = true;
                continue;
            }
            Event::TimerExpired(id) if Some(id) == repeat_timer => {
                if repeat == Repeat::On {
                    super::synthesize_repeat_presses();
                }
                continue;
            }
            _ => {}
        }

        // Auto-repeat arming: long press of any adjust button starts it,
        // release stops it, a chord inhibits it until release
        if matches!(event, Event::Chord(_)) {
            repeat = Repeat::Inhibit;
        } else if repeat == Repeat::Off && panel_action(&event, ButtonAction::Long) {
            repeat = Repeat::On;
        } else if panel_action(&event, ButtonAction::Released) {
            repeat = Repeat::Off;
        }

        // Selection moves restart the blink at the dim phase
        if matches!(event, Event::LeftRotary(_)) {
            blink = BLINK_LOW;
        }

        match editor.handle(&event) {
            EditorAction::Changed => refresh = true,
            EditorAction::Accepted => break true,
            EditorAction::Cancelled => break false,
            EditorAction::None => {}
        }
    };

    TIMERS.lock(|t| {
        let mut t = t.borrow_mut();
        if let Some(id) = blink_timer {
            t.stop(id);
        }
        if let Some(id) = repeat_timer {
            t.stop(id);
        }
    });

    if accepted {
        *time = editor.time();
    }
    accepted
}
