//! Interactive date editor
//!
//! Same shell as the time editor over [`DateEditor`], which keeps the
//! day clamped to the month's length as the month and year move. Chords:
//! 0+1 resets the month, 2+3 the day, 4+5 the year, 0+5 the whole date
//! to 2000-01-01.

use core::fmt::Write;

use cathode_core::clock::Date;
use cathode_core::config::ms_to_ticks;
use cathode_core::display::DisplayStream;
use cathode_core::editor::{DateEditor, DateField, EditorAction};
use cathode_core::event::{ButtonAction, Event};

use super::{panel_action, Repeat, BLINK_HIGH, BLINK_LOW, NORMAL};
use crate::events::wait_next_event;
use crate::shared::TIMERS;

/// Run the editor over `date`; returns whether the result should be
/// applied
pub async fn set_date(primary: &mut DisplayStream<'static>, date: &mut Date) -> bool {
    let mut editor = DateEditor::new(*date);
    let mut blink = BLINK_LOW;
    let mut refresh = true;
    let mut repeat = Repeat::Off;

    let blink_timer = TIMERS.lock(|t| t.borrow_mut().start(ms_to_ticks(200), true));
    let repeat_timer = TIMERS.lock(|t| t.borrow_mut().start(ms_to_ticks(100), true));

    let accepted = loop {
        if refresh {
            refresh = false;
            let field = editor.selected();
            let value = editor.date();
            let mi = if field == DateField::Month { blink } else { NORMAL } as char;
            let di = if field == DateField::Day { blink } else { NORMAL } as char;
            let yi = if field == DateField::Year { blink } else { NORMAL } as char;
            let _ = write!(
                primary,
                "\r*{}{:02}*{}{:02}*{}{:02}",
                mi,
                value.month,
                di,
                value.day,
                yi,
                value.year % 100
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

        if matches!(event, Event::Chord(_)) {
            repeat = Repeat::Inhibit;
        } else if repeat == Repeat::Off && panel_action(&event, ButtonAction::Long) {
            repeat = Repeat::On;
        } else if panel_action(&event, ButtonAction::Released) {
            repeat = Repeat::Off;
        }

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
        *date = editor.date();
    }
    accepted
}
