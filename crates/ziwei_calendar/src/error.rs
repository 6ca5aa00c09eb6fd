//! Error types for calendar validation and lunar conversion.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from Gregorian validation or a lunar adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    /// The Gregorian date does not exist (e.g. Feb 30).
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Hour or minute outside the civil clock range.
    InvalidTime { hour: u32, minute: u32 },
    /// A tabulated adapter has no entry for the requested day.
    NotTabulated { year: i32, month: u32, day: u32 },
    /// Lunar facts supplied to an adapter are out of range.
    InvalidLunar(&'static str),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid Gregorian date: {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidTime { hour, minute } => {
                write!(f, "invalid time of day: {hour:02}:{minute:02}")
            }
            Self::NotTabulated { year, month, day } => {
                write!(f, "no lunar data tabulated for {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidLunar(msg) => write!(f, "invalid lunar date: {msg}"),
        }
    }
}

impl Error for CalendarError {}
