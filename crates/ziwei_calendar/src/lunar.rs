//! Lunar-date adapter contract.
//!
//! Gregorian → Chinese lunisolar conversion is an external capability. The
//! chart engine only needs five facts about a birth instant, captured in
//! [`LunarDate`], and obtains them through the [`LunarAdapter`] trait.
//!
//! [`LunarTable`] is the adapter shipped with the workspace: it answers from
//! caller-supplied tabulated lunar days and derives the two-hour time branch
//! from the clock hour.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::gregorian::GregorianDateTime;

/// Lunar facts for one birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    /// Lunar month 1..=12; negative when the month is a leap (閏) month.
    pub month: i8,
    /// Lunar day 1..=30.
    pub day: u8,
    /// Year heavenly stem index 0..=9 (0 = 甲).
    pub year_stem: u8,
    /// Year earthly branch index 0..=11 (0 = 子).
    pub year_branch: u8,
    /// Two-hour time branch index 0..=11 (0 = 子).
    pub time_branch: u8,
}

impl LunarDate {
    /// Whether the month is flagged as a leap month.
    pub const fn is_leap_month(&self) -> bool {
        self.month < 0
    }

    /// Month number without the leap flag.
    pub const fn month_number(&self) -> u8 {
        self.month.unsigned_abs()
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(1..=12).contains(&self.month_number()) {
            return Err(CalendarError::InvalidLunar("month must be 1..=12"));
        }
        if !(1..=30).contains(&self.day) {
            return Err(CalendarError::InvalidLunar("day must be 1..=30"));
        }
        if self.year_stem > 9 {
            return Err(CalendarError::InvalidLunar("year stem must be 0..=9"));
        }
        if self.year_branch > 11 {
            return Err(CalendarError::InvalidLunar("year branch must be 0..=11"));
        }
        if self.time_branch > 11 {
            return Err(CalendarError::InvalidLunar("time branch must be 0..=11"));
        }
        if self.year_stem % 2 != self.year_branch % 2 {
            return Err(CalendarError::InvalidLunar(
                "year stem and branch parity differ",
            ));
        }
        Ok(())
    }
}

/// Source of lunar facts for a Gregorian instant.
pub trait LunarAdapter {
    /// Convert a civil date/time into lunar facts.
    ///
    /// Implementations return [`CalendarError::InvalidDate`] or
    /// [`CalendarError::InvalidTime`] for impossible inputs.
    fn convert(&self, instant: &GregorianDateTime) -> Result<LunarDate, CalendarError>;
}

impl<A: LunarAdapter + ?Sized> LunarAdapter for &A {
    fn convert(&self, instant: &GregorianDateTime) -> Result<LunarDate, CalendarError> {
        (**self).convert(instant)
    }
}

/// Two-hour time branch for a clock hour: 23:00–00:59 is 子 (0),
/// 01:00–02:59 is 丑 (1), and so on.
pub const fn time_branch_index(hour: u32) -> u8 {
    (((hour + 1) / 2) % 12) as u8
}

/// One tabulated lunar day (the time branch is derived per query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDay {
    /// Lunar month; negative for a leap month.
    pub month: i8,
    pub day: u8,
    pub year_stem: u8,
    pub year_branch: u8,
}

/// Adapter answering from a table of Gregorian day → lunar day entries.
#[derive(Debug, Clone, Default)]
pub struct LunarTable {
    days: BTreeMap<(i32, u32, u32), LunarDay>,
}

impl LunarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the lunar day for a Gregorian date.
    ///
    /// The Gregorian date and the lunar fields are both range-checked.
    pub fn insert(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        lunar: LunarDay,
    ) -> Result<(), CalendarError> {
        GregorianDateTime::new(year, month, day, 0, 0).validate()?;
        LunarDate {
            month: lunar.month,
            day: lunar.day,
            year_stem: lunar.year_stem,
            year_branch: lunar.year_branch,
            time_branch: 0,
        }
        .validate()?;
        self.days.insert((year, month, day), lunar);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_day(
        mut self,
        year: i32,
        month: u32,
        day: u32,
        lunar: LunarDay,
    ) -> Result<Self, CalendarError> {
        self.insert(year, month, day, lunar)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl LunarAdapter for LunarTable {
    fn convert(&self, instant: &GregorianDateTime) -> Result<LunarDate, CalendarError> {
        instant.validate()?;
        let (year, month, day) = instant.date_key();
        let entry = self
            .days
            .get(&(year, month, day))
            .ok_or(CalendarError::NotTabulated { year, month, day })?;
        Ok(LunarDate {
            month: entry.month,
            day: entry.day,
            year_stem: entry.year_stem,
            year_branch: entry.year_branch,
            time_branch: time_branch_index(instant.hour),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ji_wei_8_6() -> LunarDay {
        LunarDay {
            month: 8,
            day: 6,
            year_stem: 5,
            year_branch: 7,
        }
    }

    #[test]
    fn time_branch_boundaries() {
        assert_eq!(time_branch_index(23), 0);
        assert_eq!(time_branch_index(0), 0);
        assert_eq!(time_branch_index(1), 1);
        assert_eq!(time_branch_index(2), 1);
        assert_eq!(time_branch_index(9), 5);
        assert_eq!(time_branch_index(17), 9);
        assert_eq!(time_branch_index(22), 11);
    }

    #[test]
    fn leap_flag() {
        let d = LunarDate {
            month: -6,
            day: 3,
            year_stem: 5,
            year_branch: 7,
            time_branch: 0,
        };
        assert!(d.is_leap_month());
        assert_eq!(d.month_number(), 6);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn lunar_ranges_rejected() {
        let mut d = LunarDate {
            month: 13,
            day: 1,
            year_stem: 0,
            year_branch: 0,
            time_branch: 0,
        };
        assert!(d.validate().is_err());
        d.month = 1;
        d.day = 31;
        assert!(d.validate().is_err());
        d.day = 1;
        d.year_branch = 1;
        assert!(d.validate().is_err(), "甲丑 is not a sexagenary pair");
    }

    #[test]
    fn table_lookup_derives_time_branch() {
        let table = LunarTable::new()
            .with_day(1979, 9, 26, ji_wei_8_6())
            .unwrap();
        let lunar = table
            .convert(&GregorianDateTime::new(1979, 9, 26, 17, 30))
            .unwrap();
        assert_eq!(lunar.month, 8);
        assert_eq!(lunar.day, 6);
        assert_eq!(lunar.time_branch, 9);
    }

    #[test]
    fn table_miss_is_reported() {
        let table = LunarTable::new();
        assert_eq!(
            table.convert(&GregorianDateTime::new(2000, 1, 1, 0, 0)),
            Err(CalendarError::NotTabulated {
                year: 2000,
                month: 1,
                day: 1
            })
        );
    }

    #[test]
    fn invalid_gregorian_before_lookup() {
        let table = LunarTable::new();
        assert!(matches!(
            table.convert(&GregorianDateTime::new(1985, 2, 30, 9, 0)),
            Err(CalendarError::InvalidDate { .. })
        ));
    }
}
