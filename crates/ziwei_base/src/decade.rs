//! Decade cycle (大限), age-to-year mapping, and the minor limit (小限).
//!
//! The decade direction is clockwise when the year stem's polarity matches
//! the gender (yang male or yin female). Starting at the Natal Palace, each
//! palace in that direction covers ten ages, the first beginning at
//! the bureau number. A decade age `a` falls in lunar year
//! `lunar_birth_year + a`; the minor limit runs on the 虛歲 of that year,
//! which is `a + 1`.

use serde::{Deserialize, Serialize};

use crate::bureau::Bureau;
use crate::ganzhi::{Branch, Stem, annual_stem_branch};

/// Length of one decade in years.
pub const DECADE_YEARS: u32 = 10;

/// Travel direction around the branch circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Clockwise (順行), +1.
    Forward,
    /// Counter-clockwise (逆行), -1.
    Backward,
}

impl Direction {
    pub const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "順行",
            Self::Backward => "逆行",
        }
    }
}

/// Decade direction for a year stem and gender.
pub const fn decade_direction(year_stem: Stem, is_male: bool) -> Direction {
    if year_stem.is_yang() == is_male {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Age window `(start, end)` at every branch, indexed by branch.
pub fn age_windows(natal: Branch, bureau: Bureau, direction: Direction) -> [(u32, u32); 12] {
    let mut out = [(0, 0); 12];
    let mut start = bureau.number() as u32;
    for i in 0..12 {
        let branch = natal.offset(i * direction.step());
        out[branch.index() as usize] = (start, start + DECADE_YEARS - 1);
        start += DECADE_YEARS;
    }
    out
}

/// Calendar year matching decade age `age` for a person born in
/// `lunar_birth_year`.
pub const fn year_at_age(lunar_birth_year: i32, age: u32) -> i32 {
    lunar_birth_year + age as i32
}

/// 虛歲 in `year` for a person born in `lunar_birth_year` (birth year is 1).
pub const fn nominal_age_in(lunar_birth_year: i32, year: i32) -> u32 {
    (year - lunar_birth_year + 1) as u32
}

/// 小限 starting branch (age 1) by year-branch trine group
/// (申子辰, 巳酉丑, 寅午戌, 亥卯未).
pub const MINOR_LIMIT_START: [Branch; 4] = [Branch::Xu, Branch::Wei, Branch::Chen, Branch::Chou];

/// Minor-limit (小限) palace for 虛歲 `age` (1-based).
pub const fn minor_limit_branch(year_branch: Branch, is_male: bool, age: u32) -> Branch {
    let start = MINOR_LIMIT_START[year_branch.trine_group() as usize];
    let step = if is_male { 1 } else { -1 };
    let steps = (age.saturating_sub(1) % 12) as i32;
    start.offset(steps * step)
}

/// One year inside a decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnualPeriod {
    /// Position 0..=9 within the decade.
    pub offset: u8,
    pub year: i32,
    /// Decade age for this year, as shown on the palace window.
    pub age: u32,
    pub stem: Stem,
    pub branch: Branch,
    /// Minor-limit palace, counted on the 虛歲 (`age + 1`).
    pub minor_limit: Branch,
}

/// Minor-limit palace of a selected year and the stem it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinorLimit {
    pub branch: Branch,
    pub stem: Stem,
}

/// One decade of life, bound to a palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadePeriod {
    /// Position 0..=11 after sorting palaces by starting age.
    pub ordinal: u8,
    pub branch: Branch,
    /// Palace stem, used as the decade sihua stem.
    pub stem: Stem,
    pub age_start: u32,
    pub age_end: u32,
    pub first_year: i32,
    pub last_year: i32,
}

impl DecadePeriod {
    /// The ten annual periods of this decade.
    pub fn annuals(&self, year_branch: Branch, is_male: bool) -> [AnnualPeriod; 10] {
        let mut out = [AnnualPeriod {
            offset: 0,
            year: 0,
            age: 0,
            stem: Stem::Jia,
            branch: Branch::Zi,
            minor_limit: Branch::Zi,
        }; 10];
        for (j, slot) in out.iter_mut().enumerate() {
            *slot = self.annual_unchecked(j as u8, year_branch, is_male);
        }
        out
    }

    /// Annual period at `offset` (0..=9), or `None` out of range.
    pub fn annual(&self, offset: u8, year_branch: Branch, is_male: bool) -> Option<AnnualPeriod> {
        (offset < DECADE_YEARS as u8).then(|| self.annual_unchecked(offset, year_branch, is_male))
    }

    fn annual_unchecked(&self, offset: u8, year_branch: Branch, is_male: bool) -> AnnualPeriod {
        let year = self.first_year + offset as i32;
        let age = self.age_start + offset as u32;
        let (stem, branch) = annual_stem_branch(year);
        AnnualPeriod {
            offset,
            year,
            age,
            stem,
            branch,
            minor_limit: minor_limit_branch(year_branch, is_male, age + 1),
        }
    }

    pub fn contains_age(&self, age: u32) -> bool {
        (self.age_start..=self.age_end).contains(&age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::ALL_STEMS;

    #[test]
    fn direction_rule() {
        for stem in ALL_STEMS {
            for male in [true, false] {
                let expected = if stem.is_yang() == male { 1 } else { -1 };
                assert_eq!(decade_direction(stem, male).step(), expected);
            }
        }
    }

    #[test]
    fn windows_start_at_bureau() {
        let w = age_windows(Branch::Zi, Bureau::Water2, Direction::Forward);
        assert_eq!(w[0], (2, 11));
        assert_eq!(w[1], (12, 21));
        assert_eq!(w[11], (112, 121));
    }

    #[test]
    fn windows_backward() {
        let w = age_windows(Branch::Wei, Bureau::Earth5, Direction::Backward);
        assert_eq!(w[Branch::Wei.index() as usize], (5, 14));
        assert_eq!(w[Branch::Wu.index() as usize], (15, 24));
        assert_eq!(w[Branch::Shen.index() as usize], (115, 124));
    }

    #[test]
    fn decade_age_year() {
        assert_eq!(year_at_age(1979, 2), 1981);
        assert_eq!(year_at_age(1984, 5), 1989);
        assert_eq!(nominal_age_in(1979, 1979), 1);
        assert_eq!(nominal_age_in(1979, year_at_age(1979, 12)), 13);
    }

    #[test]
    fn minor_limit_male_and_female() {
        // 子 year: age 1 at 戌
        assert_eq!(minor_limit_branch(Branch::Zi, true, 1), Branch::Xu);
        assert_eq!(minor_limit_branch(Branch::Zi, true, 2), Branch::Hai);
        assert_eq!(minor_limit_branch(Branch::Zi, false, 2), Branch::You);
        // 午 year: age 1 at 辰, cycle repeats every 12
        assert_eq!(minor_limit_branch(Branch::Wu, true, 13), Branch::Chen);
        // 未 year: age 1 at 丑
        assert_eq!(minor_limit_branch(Branch::Wei, false, 1), Branch::Chou);
    }

    #[test]
    fn annuals_of_decade() {
        let d = DecadePeriod {
            ordinal: 0,
            branch: Branch::Zi,
            stem: Stem::Bing,
            age_start: 2,
            age_end: 11,
            first_year: year_at_age(1979, 2),
            last_year: year_at_age(1979, 11),
        };
        let a = d.annuals(Branch::Wei, false);
        assert_eq!(a[0].year, 1981);
        assert_eq!(a[0].age, 2);
        assert_eq!((a[0].stem, a[0].branch), (Stem::Xin, Branch::You));
        // 虛歲 3: 丑 counted back two → 亥
        assert_eq!(a[0].minor_limit, Branch::Hai);
        assert_eq!(a[9].year, 1990);
        assert_eq!(d.annual(10, Branch::Wei, false), None);
        assert!(d.contains_age(11));
        assert!(!d.contains_age(12));
    }
}
