//! Wall clock: time and date with the Gregorian leap rule
//!
//! Advanced one second at a time by the 1 Hz pulse the tick driver
//! derives via [`SecondsDivider`]. The supported date window is
//! 2000..=2099, which lets February use the short leap rule (divisible by
//! 4 and not by 100) without the 400-year exception - no year in the
//! window triggers it.

use crate::config::TICK_HZ;

/// First year the date editor can select
pub const MIN_YEAR: u16 = 2000;

/// Last year the date editor can select
pub const MAX_YEAR: u16 = 2099;

const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Time of day, 24-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Days in a month for the supported year window
pub fn days_in_month(month: u8, year: u16) -> u8 {
    let mut days = DAYS_IN_MONTH[month as usize];
    if month == 2 && year % 4 == 0 && year % 100 != 0 {
        days += 1;
    }
    days
}

/// Convert a 24-hour hour to (12-hour hour, pm)
pub fn hour_24_to_12(hour_24: u8) -> (u8, bool) {
    let pm = hour_24 >= 12;
    let hour_12 = match hour_24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    (hour_12, pm)
}

/// Convert a 12-hour hour plus am/pm to 24-hour
pub fn hour_12_to_24(hour_12: u8, pm: bool) -> u8 {
    hour_12 % 12 + if pm { 12 } else { 0 }
}

/// The timekeeper
///
/// Written by the 1 Hz updater in interrupt context; the application
/// reads and writes it under the board's critical section.
pub struct WallClock {
    time: Time,
    date: Date,
    run: bool,
}

impl WallClock {
    /// Boot state: 12:00:00 on 2000-01-01, not running
    pub const fn new() -> Self {
        Self {
            time: Time {
                hour: 12,
                minute: 0,
                second: 0,
            },
            date: Date {
                year: MIN_YEAR,
                month: 1,
                day: 1,
            },
            run: false,
        }
    }

    /// Gate the 1 Hz advance
    pub fn set_running(&mut self, run: bool) {
        self.run = run;
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    /// Time in 12-hour form plus a pm flag
    pub fn time_12(&self) -> (Time, bool) {
        let (hour, pm) = hour_24_to_12(self.time.hour);
        (Time { hour, ..self.time }, pm)
    }

    /// Set the time from 12-hour form
    pub fn set_time_12(&mut self, time: Time, pm: bool) {
        self.time = Time {
            hour: hour_12_to_24(time.hour, pm),
            ..time
        };
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn set_date(&mut self, date: Date) {
        self.date = date;
    }

    /// Advance one second, rolling over through the calendar
    ///
    /// No-op while the run gate is off.
    pub fn tick_second(&mut self) {
        if !self.run {
            return;
        }

        self.time.second += 1;
        if self.time.second < 60 {
            return;
        }
        self.time.second = 0;

        self.time.minute += 1;
        if self.time.minute < 60 {
            return;
        }
        self.time.minute = 0;

        self.time.hour += 1;
        if self.time.hour < 24 {
            return;
        }
        self.time.hour = 0;

        self.date.day += 1;
        if self.date.day > days_in_month(self.date.month, self.date.year) {
            self.date.day = 1;
            self.date.month += 1;
            if self.date.month > 12 {
                self.date.month = 1;
                self.date.year += 1;
            }
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Divide the tick rate down to the 1 Hz pulse
pub struct SecondsDivider {
    remaining: u32,
}

impl SecondsDivider {
    pub const fn new() -> Self {
        Self { remaining: TICK_HZ }
    }

    /// Count one tick; returns true once per second
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = TICK_HZ;
            true
        } else {
            false
        }
    }
}

impl Default for SecondsDivider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clock_at(time: Time, date: Date) -> WallClock {
        let mut clock = WallClock::new();
        clock.set_time(time);
        clock.set_date(date);
        clock.set_running(true);
        clock
    }

    #[test]
    fn test_second_minute_hour_rollover() {
        let mut clock = clock_at(
            Time { hour: 23, minute: 59, second: 59 },
            Date { year: 2024, month: 12, day: 31 },
        );
        clock.tick_second();
        assert_eq!(clock.time(), Time { hour: 0, minute: 0, second: 0 });
        assert_eq!(clock.date(), Date { year: 2025, month: 1, day: 1 });
    }

    #[test]
    fn test_month_rollover() {
        let mut clock = clock_at(
            Time { hour: 23, minute: 59, second: 59 },
            Date { year: 2024, month: 4, day: 30 },
        );
        clock.tick_second();
        assert_eq!(clock.date(), Date { year: 2024, month: 5, day: 1 });
    }

    #[test]
    fn test_leap_day_2000_exists() {
        let mut clock = clock_at(
            Time { hour: 23, minute: 59, second: 59 },
            Date { year: 2000, month: 2, day: 28 },
        );
        clock.tick_second();
        assert_eq!(clock.date(), Date { year: 2000, month: 2, day: 29 });
    }

    #[test]
    fn test_non_leap_february_2001() {
        assert_eq!(days_in_month(2, 2001), 28);
        let mut clock = clock_at(
            Time { hour: 23, minute: 59, second: 59 },
            Date { year: 2001, month: 2, day: 28 },
        );
        clock.tick_second();
        assert_eq!(clock.date(), Date { year: 2001, month: 3, day: 1 });
    }

    #[test]
    fn test_leap_years_in_window() {
        // Every fourth year from 2000 through 2096 is a leap year here;
        // 2100 would not be, but it is outside the window
        for year in MIN_YEAR..=MAX_YEAR {
            let expected = year % 4 == 0 && year % 100 != 0;
            assert_eq!(days_in_month(2, year) == 29, expected, "year {}", year);
        }
        assert_eq!(days_in_month(2, 2000), 29);
        assert_eq!(days_in_month(2, 2096), 29);
    }

    #[test]
    fn test_run_gate() {
        let mut clock = WallClock::new();
        clock.tick_second();
        assert_eq!(clock.time(), Time { hour: 12, minute: 0, second: 0 });

        clock.set_running(true);
        clock.tick_second();
        assert_eq!(clock.time().second, 1);
    }

    #[test]
    fn test_12_hour_conversion_table() {
        assert_eq!(hour_24_to_12(0), (12, false));
        assert_eq!(hour_24_to_12(1), (1, false));
        assert_eq!(hour_24_to_12(11), (11, false));
        assert_eq!(hour_24_to_12(12), (12, true));
        assert_eq!(hour_24_to_12(13), (1, true));
        assert_eq!(hour_24_to_12(23), (11, true));

        // Midnight and noon are the classic traps
        assert_eq!(hour_12_to_24(12, false), 0);
        assert_eq!(hour_12_to_24(12, true), 12);
        assert_eq!(hour_12_to_24(1, false), 1);
        assert_eq!(hour_12_to_24(11, true), 23);
    }

    #[test]
    fn test_set_time_12() {
        let mut clock = WallClock::new();
        clock.set_time_12(Time { hour: 12, minute: 5, second: 6 }, false);
        assert_eq!(clock.time(), Time { hour: 0, minute: 5, second: 6 });

        clock.set_time_12(Time { hour: 7, minute: 0, second: 0 }, true);
        assert_eq!(clock.time().hour, 19);

        let (time, pm) = clock.time_12();
        assert_eq!(time.hour, 7);
        assert!(pm);
    }

    #[test]
    fn test_seconds_divider() {
        let mut divider = SecondsDivider::new();
        let mut pulses = 0;
        for _ in 0..TICK_HZ * 3 {
            if divider.tick() {
                pulses += 1;
            }
        }
        assert_eq!(pulses, 3);
    }

    proptest! {
        /// 12-hour round trip: every valid 24-hour value survives the
        /// conversion to 12-hour form and back.
        #[test]
        fn prop_hour_round_trip(hour in 0u8..24) {
            let (h12, pm) = hour_24_to_12(hour);
            prop_assert!((1..=12).contains(&h12));
            prop_assert_eq!(hour_12_to_24(h12, pm), hour);
        }

        /// The rollover chain keeps every field in range from any valid
        /// starting point.
        #[test]
        fn prop_fields_stay_in_range(
            hour in 0u8..24, minute in 0u8..60, second in 0u8..60,
            year in MIN_YEAR..=MAX_YEAR, month in 1u8..=12, steps in 1u32..10_000,
        ) {
            let day_max = days_in_month(month, year);
            let mut clock = clock_at(
                Time { hour, minute, second },
                Date { year, month, day: day_max },
            );
            for _ in 0..steps {
                clock.tick_second();
                let t = clock.time();
                let d = clock.date();
                prop_assert!(t.hour < 24 && t.minute < 60 && t.second < 60);
                prop_assert!((1..=12).contains(&d.month));
                prop_assert!(d.day >= 1 && d.day <= days_in_month(d.month, d.year));
            }
        }
    }
}
