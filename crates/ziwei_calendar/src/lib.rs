//! Calendar inputs for the ziwei chart engine.
//!
//! This crate provides:
//! - Gregorian date/time validation
//! - The [`LunarAdapter`] contract through which the engine obtains lunar
//!   month, day, year stem/branch and two-hour time branch
//! - [`LunarTable`], an adapter backed by tabulated lunar days
//!
//! Lunisolar conversion arithmetic itself is not implemented here; adapters
//! wrap whatever almanac the caller trusts.

pub mod error;
pub mod gregorian;
pub mod lunar;

pub use error::CalendarError;
pub use gregorian::{GregorianDateTime, days_in_month, is_leap_year, is_valid_date};
pub use lunar::{LunarAdapter, LunarDate, LunarDay, LunarTable, time_branch_index};
