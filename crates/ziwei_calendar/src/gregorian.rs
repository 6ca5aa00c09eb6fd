//! Proleptic Gregorian calendar validation.
//!
//! Only the checks a lunar adapter needs before it looks anything up:
//! leap years, month lengths, and civil clock ranges.

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Civil Gregorian date and wall-clock time (minute precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GregorianDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl GregorianDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Check that the date exists and the time lies within 00:00..=23:59.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !is_valid_date(self.year, self.month, self.day) {
            return Err(CalendarError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        if self.hour > 23 || self.minute > 59 {
            return Err(CalendarError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
            });
        }
        Ok(())
    }

    /// The calendar day without the time component.
    pub const fn date_key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

impl std::fmt::Display for GregorianDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, or `None` for a month outside 1..=12.
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            if is_leap_year(year) {
                Some(29)
            } else {
                Some(28)
            }
        }
        _ => None,
    }
}

/// Whether `year-month-day` names an existing Gregorian day.
pub const fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    match days_in_month(year, month) {
        Some(n) => day >= 1 && day <= n,
        None => false,
    }
}
