//! Edit-mode state machines for time and date
//!
//! The interactive editors route input events into these machines and
//! render whatever they hold; blink timers, auto-repeat and drawing stay
//! with the caller. Field selection moves with the left knob (wrapping),
//! values move with the right knob and the six panel buttons, chords
//! reset fields, and the knob push buttons finish the session:
//! right accepts, left cancels. The edited value lives here and is only
//! applied by the caller on accept.

use crate::clock::{days_in_month, Date, Time, MAX_YEAR, MIN_YEAR};
use crate::event::{Button, ButtonAction, Event};

/// What an event did to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditorAction {
    /// Event was not for this editor
    None,
    /// Value or selection changed; redraw
    Changed,
    /// Right knob pressed: apply the edited value
    Accepted,
    /// Left knob pressed: discard the edited value
    Cancelled,
}

/// Time editor fields in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

/// Chord patterns the editors recognize
const CHORD_FIRST: u8 = 0x03; // buttons 0+1
const CHORD_SECOND: u8 = 0x0C; // buttons 2+3
const CHORD_THIRD: u8 = 0x30; // buttons 4+5
const CHORD_ALL: u8 = 0x21; // buttons 0+5

fn wrap_add(value: u8, delta: i8, modulus: i16) -> u8 {
    (value as i16 + delta as i16).rem_euclid(modulus) as u8
}

/// Field-select/value-adjust machine over a [`Time`]
pub struct TimeEditor {
    time: Time,
    selected: i8,
}

impl TimeEditor {
    pub fn new(time: Time) -> Self {
        Self { time, selected: 0 }
    }

    /// The value being edited
    pub fn time(&self) -> Time {
        self.time
    }

    /// The field the cursor is on
    pub fn selected(&self) -> TimeField {
        match self.selected {
            0 => TimeField::Hours,
            1 => TimeField::Minutes,
            _ => TimeField::Seconds,
        }
    }

    /// Route one event into the editor
    pub fn handle(&mut self, event: &Event) -> EditorAction {
        match *event {
            Event::Button { button, action: ButtonAction::Pressed, .. } => match button {
                Button::B0 => {
                    self.time.hour = wrap_add(self.time.hour, -1, 24);
                    self.selected = 0;
                    EditorAction::Changed
                }
                Button::B1 => {
                    self.time.hour = wrap_add(self.time.hour, 1, 24);
                    self.selected = 0;
                    EditorAction::Changed
                }
                Button::B2 => {
                    self.time.minute = wrap_add(self.time.minute, -1, 60);
                    self.selected = 1;
                    EditorAction::Changed
                }
                Button::B3 => {
                    self.time.minute = wrap_add(self.time.minute, 1, 60);
                    self.selected = 1;
                    EditorAction::Changed
                }
                Button::B4 => {
                    self.time.second = wrap_add(self.time.second, -1, 60);
                    self.selected = 2;
                    EditorAction::Changed
                }
                Button::B5 => {
                    self.time.second = wrap_add(self.time.second, 1, 60);
                    self.selected = 2;
                    EditorAction::Changed
                }
                Button::RightKnob => EditorAction::Accepted,
                Button::LeftKnob => EditorAction::Cancelled,
            },

            Event::Chord(pattern) => {
                match pattern {
                    CHORD_FIRST => {
                        self.time.hour = 0;
                        self.selected = 0;
                    }
                    CHORD_SECOND => {
                        self.time.minute = 0;
                        self.selected = 1;
                    }
                    CHORD_THIRD => {
                        self.time.second = 0;
                        self.selected = 2;
                    }
                    CHORD_ALL => {
                        self.time = Time { hour: 0, minute: 0, second: 0 };
                        self.selected = 0;
                    }
                    _ => return EditorAction::None,
                }
                EditorAction::Changed
            }

            Event::LeftRotary(delta) => {
                self.selected = (self.selected as i16 + delta as i16).rem_euclid(3) as i8;
                EditorAction::Changed
            }

            Event::RightRotary(delta) => {
                match self.selected {
                    0 => self.time.hour = wrap_add(self.time.hour, delta, 24),
                    1 => self.time.minute = wrap_add(self.time.minute, delta, 60),
                    _ => self.time.second = wrap_add(self.time.second, delta, 60),
                }
                EditorAction::Changed
            }

            _ => EditorAction::None,
        }
    }
}

/// Date editor fields in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateField {
    Month,
    Day,
    Year,
}

/// Field-select/value-adjust machine over a [`Date`]
///
/// Every change re-clamps the day to the month's length, so the held
/// date is always valid.
pub struct DateEditor {
    date: Date,
    selected: i8,
}

impl DateEditor {
    pub fn new(date: Date) -> Self {
        Self { date, selected: 0 }
    }

    /// The value being edited
    pub fn date(&self) -> Date {
        self.date
    }

    /// The field the cursor is on
    pub fn selected(&self) -> DateField {
        match self.selected {
            0 => DateField::Month,
            1 => DateField::Day,
            _ => DateField::Year,
        }
    }

    fn clamp_day(&mut self) {
        let max_day = days_in_month(self.date.month, self.date.year);
        if self.date.day > max_day {
            self.date.day = max_day;
        }
    }

    fn add_months(&mut self, delta: i8) {
        self.date.month = (wrap_add(self.date.month - 1, delta, 12)) + 1;
    }

    fn add_days(&mut self, delta: i8) {
        let max_day = days_in_month(self.date.month, self.date.year) as i16;
        self.date.day =
            ((self.date.day as i16 - 1 + delta as i16).rem_euclid(max_day) + 1) as u8;
    }

    fn add_years(&mut self, delta: i8) {
        let span = (MAX_YEAR - MIN_YEAR + 1) as i16;
        let offset = (self.date.year - MIN_YEAR) as i16 + delta as i16;
        self.date.year = (offset.rem_euclid(span) + MIN_YEAR as i16) as u16;
    }

    /// Route one event into the editor
    pub fn handle(&mut self, event: &Event) -> EditorAction {
        let action = match *event {
            Event::Button { button, action: ButtonAction::Pressed, .. } => match button {
                Button::B0 => {
                    self.add_months(-1);
                    self.selected = 0;
                    EditorAction::Changed
                }
                Button::B1 => {
                    self.add_months(1);
                    self.selected = 0;
                    EditorAction::Changed
                }
                Button::B2 => {
                    self.add_days(-1);
                    self.selected = 1;
                    EditorAction::Changed
                }
                Button::B3 => {
                    self.add_days(1);
                    self.selected = 1;
                    EditorAction::Changed
                }
                Button::B4 => {
                    self.add_years(-1);
                    self.selected = 2;
                    EditorAction::Changed
                }
                Button::B5 => {
                    self.add_years(1);
                    self.selected = 2;
                    EditorAction::Changed
                }
                Button::RightKnob => EditorAction::Accepted,
                Button::LeftKnob => EditorAction::Cancelled,
            },

            Event::Chord(pattern) => {
                match pattern {
                    CHORD_FIRST => {
                        self.date.month = 1;
                        self.selected = 0;
                    }
                    CHORD_SECOND => {
                        self.date.day = 1;
                        self.selected = 1;
                    }
                    CHORD_THIRD => {
                        self.date.year = MIN_YEAR;
                        self.selected = 2;
                    }
                    CHORD_ALL => {
                        self.date = Date { year: MIN_YEAR, month: 1, day: 1 };
                        self.selected = 0;
                    }
                    _ => return EditorAction::None,
                }
                EditorAction::Changed
            }

            Event::LeftRotary(delta) => {
                self.selected = (self.selected as i16 + delta as i16).rem_euclid(3) as i8;
                EditorAction::Changed
            }

            Event::RightRotary(delta) => {
                match self.selected {
                    0 => self.add_months(delta),
                    1 => self.add_days(delta),
                    _ => self.add_years(delta),
                }
                EditorAction::Changed
            }

            _ => EditorAction::None,
        };

        if action == EditorAction::Changed {
            self.clamp_day();
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: Button) -> Event {
        Event::Button {
            button,
            action: ButtonAction::Pressed,
            held: 0,
        }
    }

    #[test]
    fn test_set_time_accept() {
        // Increment hours at 23:59:58: wraps to 0, the rest untouched;
        // right knob accepts
        let mut editor = TimeEditor::new(Time { hour: 23, minute: 59, second: 58 });

        assert_eq!(editor.handle(&press(Button::B1)), EditorAction::Changed);
        assert_eq!(editor.time(), Time { hour: 0, minute: 59, second: 58 });

        assert_eq!(editor.handle(&press(Button::RightKnob)), EditorAction::Accepted);
        assert_eq!(editor.time(), Time { hour: 0, minute: 59, second: 58 });
    }

    #[test]
    fn test_set_time_cancel() {
        let mut editor = TimeEditor::new(Time { hour: 23, minute: 59, second: 58 });
        editor.handle(&press(Button::B1));
        assert_eq!(editor.handle(&press(Button::LeftKnob)), EditorAction::Cancelled);
    }

    #[test]
    fn test_chord_resets_whole_time() {
        let mut editor = TimeEditor::new(Time { hour: 17, minute: 23, second: 41 });
        assert_eq!(editor.handle(&Event::Chord(0x21)), EditorAction::Changed);
        assert_eq!(editor.time(), Time { hour: 0, minute: 0, second: 0 });
    }

    #[test]
    fn test_chord_resets_single_fields() {
        let mut editor = TimeEditor::new(Time { hour: 17, minute: 23, second: 41 });
        editor.handle(&Event::Chord(0x0C));
        assert_eq!(editor.time(), Time { hour: 17, minute: 0, second: 41 });
        editor.handle(&Event::Chord(0x30));
        assert_eq!(editor.time().second, 0);
        editor.handle(&Event::Chord(0x03));
        assert_eq!(editor.time().hour, 0);
    }

    #[test]
    fn test_field_selection_wraps() {
        let mut editor = TimeEditor::new(Time { hour: 1, minute: 2, second: 3 });
        assert_eq!(editor.selected(), TimeField::Hours);

        editor.handle(&Event::LeftRotary(1));
        assert_eq!(editor.selected(), TimeField::Minutes);
        editor.handle(&Event::LeftRotary(2));
        assert_eq!(editor.selected(), TimeField::Hours);
        editor.handle(&Event::LeftRotary(-1));
        assert_eq!(editor.selected(), TimeField::Seconds);
    }

    #[test]
    fn test_right_knob_adjusts_selected_field() {
        let mut editor = TimeEditor::new(Time { hour: 0, minute: 30, second: 0 });
        editor.handle(&Event::LeftRotary(1));
        editor.handle(&Event::RightRotary(-31));
        assert_eq!(editor.time().minute, 59);
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let mut editor = TimeEditor::new(Time { hour: 1, minute: 2, second: 3 });
        assert_eq!(editor.handle(&Event::SecondElapsed), EditorAction::None);
        assert_eq!(editor.handle(&Event::TimerExpired(2)), EditorAction::None);
        assert_eq!(editor.handle(&Event::Chord(0xFF)), EditorAction::None);
        assert_eq!(editor.time(), Time { hour: 1, minute: 2, second: 3 });
    }

    #[test]
    fn test_date_day_clamps_on_month_change() {
        // January 31st, month up: February clamps the day
        let mut editor = DateEditor::new(Date { year: 2001, month: 1, day: 31 });
        editor.handle(&press(Button::B1));
        assert_eq!(editor.date(), Date { year: 2001, month: 2, day: 28 });

        let mut editor = DateEditor::new(Date { year: 2004, month: 1, day: 31 });
        editor.handle(&press(Button::B1));
        assert_eq!(editor.date().day, 29);
    }

    #[test]
    fn test_date_leap_day_survives_only_in_leap_years() {
        // 2000-02-29 is valid; stepping the year to 2001 clamps it
        let mut editor = DateEditor::new(Date { year: 2000, month: 2, day: 29 });
        editor.handle(&press(Button::B5));
        assert_eq!(editor.date(), Date { year: 2001, month: 2, day: 28 });
    }

    #[test]
    fn test_date_year_wraps_at_window_edges() {
        let mut editor = DateEditor::new(Date { year: MAX_YEAR, month: 6, day: 15 });
        editor.handle(&press(Button::B5));
        assert_eq!(editor.date().year, MIN_YEAR);
        editor.handle(&press(Button::B4));
        assert_eq!(editor.date().year, MAX_YEAR);
    }

    #[test]
    fn test_date_day_wraps_within_month() {
        let mut editor = DateEditor::new(Date { year: 2001, month: 2, day: 28 });
        editor.handle(&press(Button::B3));
        assert_eq!(editor.date().day, 1);
        editor.handle(&press(Button::B2));
        assert_eq!(editor.date().day, 28);
    }

    #[test]
    fn test_date_chord_reset() {
        let mut editor = DateEditor::new(Date { year: 2042, month: 7, day: 19 });
        editor.handle(&Event::Chord(0x21));
        assert_eq!(editor.date(), Date { year: MIN_YEAR, month: 1, day: 1 });
    }

    #[test]
    fn test_date_accept_and_cancel() {
        let mut editor = DateEditor::new(Date { year: 2030, month: 3, day: 4 });
        assert_eq!(editor.handle(&press(Button::RightKnob)), EditorAction::Accepted);
        assert_eq!(editor.handle(&press(Button::LeftKnob)), EditorAction::Cancelled);
    }
}
