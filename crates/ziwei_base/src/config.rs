//! Chart construction options.
//!
//! Schools disagree on a few placements. Each disputed rule is a small enum
//! on [`ChartConfig`]; the defaults reproduce the most common practice.

use serde::{Deserialize, Serialize};

/// How a leap (閏) month is folded into the 1..=12 month used for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeapMonthPolicy {
    /// Treat the leap month as the month it repeats.
    #[default]
    AsPrecedingMonth,
    /// Days 1..=15 belong to the repeated month, days 16.. to the next one.
    SplitAtMidMonth,
}

/// Placement of 天魁/天鉞 for 辛 years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KuiYueRule {
    /// 辛 → 魁 寅, 鉞 午.
    #[default]
    XinTigerHorse,
    /// 辛 → 魁 午, 鉞 寅.
    XinHorseTiger,
}

/// Which branch selects the 天馬 trine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TianMaBasis {
    /// Branch of the lunar month (month 1 = 寅).
    #[default]
    MonthBranch,
    /// Year branch.
    YearBranch,
}

/// Options for [`build_chart`](crate::build_chart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Leap month folding. Default: [`LeapMonthPolicy::AsPrecedingMonth`].
    pub leap_month: LeapMonthPolicy,
    /// 魁鉞 variant. Default: [`KuiYueRule::XinTigerHorse`].
    pub kui_yue: KuiYueRule,
    /// 天馬 basis. Default: [`TianMaBasis::MonthBranch`].
    pub tian_ma: TianMaBasis,
}

/// Lunar day after which [`LeapMonthPolicy::SplitAtMidMonth`] rolls over.
pub const LEAP_SPLIT_DAY: u8 = 15;

impl LeapMonthPolicy {
    /// Placement month (1..=12) for a month number, leap flag, and day.
    pub const fn normalise(self, month: u8, is_leap: bool, day: u8) -> u8 {
        match self {
            Self::SplitAtMidMonth if is_leap && day > LEAP_SPLIT_DAY => month % 12 + 1,
            _ => month,
        }
    }
}
