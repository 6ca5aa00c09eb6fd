//! Caller-owned overlay selection (decade, annual year and minor limit).
//!
//! Transitions:
//! - selecting a decade enters or re-targets the decade and drops the annual;
//!   selecting the same decade again returns to the natal view
//! - selecting an annual needs a decade; the same annual again drops it
//! - an annual with no decade selected is ignored
//! - the minor-limit layer is a separate switch, only effective while an
//!   annual is selected

use serde::{Deserialize, Serialize};

use crate::decade::{AnnualPeriod, DECADE_YEARS, DecadePeriod, MinorLimit};
use crate::error::ValidationError;

/// Number of decades in a chart.
pub const DECADE_COUNT: u8 = 12;

/// Which overlay layers a selection activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionState {
    NatalOnly,
    NatalDecade,
    NatalDecadeAnnual,
}

/// Decade ordinal (0..=11) and annual offset (0..=9) chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    decade: Option<u8>,
    annual: Option<u8>,
    minor_limit: bool,
}

fn check_decade(k: i32) -> Result<u8, ValidationError> {
    if (0..DECADE_COUNT as i32).contains(&k) {
        Ok(k as u8)
    } else {
        Err(ValidationError::DecadeOutOfRange(k))
    }
}

fn check_annual(j: i32) -> Result<u8, ValidationError> {
    if (0..DECADE_YEARS as i32).contains(&j) {
        Ok(j as u8)
    } else {
        Err(ValidationError::AnnualOutOfRange(j))
    }
}

impl Selection {
    /// Natal view: nothing selected.
    pub const fn natal() -> Self {
        Self {
            decade: None,
            annual: None,
            minor_limit: false,
        }
    }

    /// Build from `-1`-sentinel indices. An annual without a decade is dropped.
    pub fn from_indices(decade: i32, annual: i32) -> Result<Self, ValidationError> {
        let decade = match decade {
            -1 => None,
            k => Some(check_decade(k)?),
        };
        let annual = match annual {
            -1 => None,
            j => Some(check_annual(j)?),
        };
        Ok(Self {
            decade,
            annual: decade.and(annual),
            minor_limit: false,
        })
    }

    /// Same selection with the minor-limit layer switched on or off.
    pub const fn with_minor_limit(mut self, on: bool) -> Self {
        self.minor_limit = on;
        self
    }

    pub fn toggle_minor_limit(&mut self) {
        self.minor_limit = !self.minor_limit;
    }

    /// Toggle decade `k`.
    pub fn select_decade(&mut self, k: i32) -> Result<(), ValidationError> {
        let k = check_decade(k)?;
        self.decade = if self.decade == Some(k) { None } else { Some(k) };
        self.annual = None;
        Ok(())
    }

    /// Toggle annual offset `j` within the selected decade.
    pub fn select_annual(&mut self, j: i32) -> Result<(), ValidationError> {
        let j = check_annual(j)?;
        if self.decade.is_none() {
            return Ok(());
        }
        self.annual = if self.annual == Some(j) { None } else { Some(j) };
        Ok(())
    }

    /// Drop the decade and annual; the minor-limit switch is kept.
    pub fn clear(&mut self) {
        self.decade = None;
        self.annual = None;
    }

    pub const fn state(&self) -> SelectionState {
        match (self.decade, self.annual) {
            (None, _) => SelectionState::NatalOnly,
            (Some(_), None) => SelectionState::NatalDecade,
            (Some(_), Some(_)) => SelectionState::NatalDecadeAnnual,
        }
    }

    pub const fn decade(&self) -> Option<u8> {
        self.decade
    }

    pub const fn annual(&self) -> Option<u8> {
        self.annual
    }

    /// Whether the minor-limit layer is switched on.
    pub const fn shows_minor_limit(&self) -> bool {
        self.minor_limit
    }

    /// Minor-limit layer is on and has a year to act on.
    pub const fn minor_limit_active(&self) -> bool {
        self.minor_limit && self.annual.is_some()
    }

    /// Decade ordinal with `-1` for none.
    pub fn decade_index(&self) -> i32 {
        self.decade.map_or(-1, i32::from)
    }

    /// Annual offset with `-1` for none.
    pub fn annual_index(&self) -> i32 {
        self.annual.map_or(-1, i32::from)
    }
}

/// A selection resolved against a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedSelection {
    pub decade: Option<DecadePeriod>,
    pub annual: Option<AnnualPeriod>,
    pub minor_limit: Option<MinorLimit>,
}
