//! Error types for chart construction and overlay selection.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ziwei_calendar::CalendarError;

/// Caller-supplied values outside their accepted range.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Hour outside 0..=23.
    HourOutOfRange(u32),
    /// Minute outside 0..=59.
    MinuteOutOfRange(u32),
    /// Gender text that is neither male nor female.
    UnknownGender(String),
    /// Stem index outside 0..=9 (and not the `-1` sentinel).
    StemOutOfRange(i32),
    /// Decade ordinal outside 0..=11.
    DecadeOutOfRange(i32),
    /// Annual offset outside 0..=9.
    AnnualOutOfRange(i32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(h) => write!(f, "hour {h} outside 0..=23"),
            Self::MinuteOutOfRange(m) => write!(f, "minute {m} outside 0..=59"),
            Self::UnknownGender(g) => write!(f, "unrecognised gender: {g:?}"),
            Self::StemOutOfRange(s) => write!(f, "stem index {s} outside 0..=9"),
            Self::DecadeOutOfRange(k) => write!(f, "decade index {k} outside 0..=11"),
            Self::AnnualOutOfRange(j) => write!(f, "annual offset {j} outside 0..=9"),
        }
    }
}

impl Error for ValidationError {}

/// Errors from [`build_chart`](crate::build_chart) and selection resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChartError {
    /// Invalid birth input or selection.
    Validation(ValidationError),
    /// The lunar adapter rejected the Gregorian instant.
    DateConversion(CalendarError),
    /// The lunar adapter returned facts the engine cannot place.
    InvalidLunarDate(&'static str),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation error: {e}"),
            Self::DateConversion(e) => write!(f, "date conversion error: {e}"),
            Self::InvalidLunarDate(msg) => write!(f, "invalid lunar date: {msg}"),
        }
    }
}

impl Error for ChartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::DateConversion(e) => Some(e),
            Self::InvalidLunarDate(_) => None,
        }
    }
}

impl From<ValidationError> for ChartError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<CalendarError> for ChartError {
    fn from(e: CalendarError) -> Self {
        Self::DateConversion(e)
    }
}
