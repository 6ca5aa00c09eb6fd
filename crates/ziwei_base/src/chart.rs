//! Chart construction.
//!
//! [`build_chart`] runs the whole placement pipeline for one birth instant:
//! lunar facts → palace layout → bureau → main stars → auxiliaries and
//! deities → life stages → decades → natal sihua. The resulting [`Chart`] is
//! immutable apart from the sihua tags, which [`Chart::apply_selection`]
//! rewrites for the chosen decade and annual year.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ziwei_calendar::{CalendarError, GregorianDateTime, LunarAdapter, LunarDate};

use crate::bureau::{Bureau, bureau_for};
use crate::config::ChartConfig;
use crate::decade::{
    DecadePeriod, Direction, MinorLimit, age_windows, decade_direction, year_at_age,
};
use crate::deity::{DeityCycle, jiangqian_anchor, lay_cycle};
use crate::error::{ChartError, ValidationError};
use crate::flow::{FlowStar, flow_stars};
use crate::ganzhi::{ALL_BRANCHES, Branch, Stem, annual_stem_branch};
use crate::life_stage::life_stages;
use crate::main_star::main_star_positions;
use crate::minor_star::{PlacementFacts, important_stars, lucun_branch, minor_stars};
use crate::palace::{
    Palace, body_palace_branch, natal_palace_branch, palace_names, palace_stems,
};
use crate::selection::{ResolvedSelection, Selection};
use crate::sihua::{apply_sihua, apply_sihua_layers};
use crate::star::{Star, StarCategory};
use crate::summary::{ming_zhu, shen_zhu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Accepts 男/女, male/female and m/f, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "男" | "male" | "m" => Ok(Self::Male),
            "女" | "female" | "f" => Ok(Self::Female),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

/// A Gregorian birth instant and gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub gender: Gender,
}

impl BirthInput {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, gender: Gender) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            gender,
        }
    }

    /// Check clock fields. Calendar validity is left to the lunar adapter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hour > 23 {
            return Err(ValidationError::HourOutOfRange(self.hour));
        }
        if self.minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(self.minute));
        }
        Ok(())
    }

    pub fn to_gregorian(&self) -> GregorianDateTime {
        GregorianDateTime::new(self.year, self.month, self.day, self.hour, self.minute)
    }
}

/// Lunar facts after leap-month normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarFacts {
    /// Placement month 1..=12.
    pub month: u8,
    pub day: u8,
    /// Whether the adapter flagged a leap month.
    pub is_leap: bool,
    pub time_branch: Branch,
}

/// A complete natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    /// Palaces indexed by branch (0 = 子).
    pub palaces: [Palace; 12],
    pub bureau: Bureau,
    pub year_stem: Stem,
    pub year_branch: Branch,
    /// Natal Palace (命宮) branch.
    pub natal: Branch,
    /// Body Palace (身宮) branch.
    pub body: Branch,
    pub input: BirthInput,
    /// Lunar year of birth; one less than the Gregorian year for births
    /// before the lunar new year.
    pub lunar_year: i32,
    pub lunar: LunarFacts,
    pub direction: Direction,
    /// 命主
    pub ming_zhu: &'static str,
    /// 身主
    pub shen_zhu: &'static str,
}

impl Chart {
    pub fn palace(&self, branch: Branch) -> &Palace {
        &self.palaces[branch.index() as usize]
    }

    pub fn natal_palace(&self) -> &Palace {
        self.palace(self.natal)
    }

    pub fn gender(&self) -> Gender {
        self.input.gender
    }

    pub fn birth_year(&self) -> i32 {
        self.input.year
    }

    /// First main star placed in the Natal Palace.
    pub fn natal_main_star(&self) -> Option<&'static str> {
        self.natal_palace().main_stars().next().map(|s| s.name)
    }

    /// Branch holding a named star.
    pub fn find_star(&self, name: &str) -> Option<Branch> {
        self.palaces.iter().find(|p| p.has_star(name)).map(|p| p.branch)
    }

    /// Decade `k` (0..=11) in age order.
    pub fn decade(&self, k: u8) -> Option<DecadePeriod> {
        if k >= 12 {
            return None;
        }
        let palace = self.palace(self.natal.offset(k as i32 * self.direction.step()));
        Some(DecadePeriod {
            ordinal: k,
            branch: palace.branch,
            stem: palace.stem,
            age_start: palace.age_start,
            age_end: palace.age_end,
            first_year: year_at_age(self.lunar_year, palace.age_start),
            last_year: year_at_age(self.lunar_year, palace.age_end),
        })
    }

    /// All twelve decades in age order.
    pub fn decades(&self) -> Vec<DecadePeriod> {
        (0..12).filter_map(|k| self.decade(k)).collect()
    }

    /// Decade whose age window covers `age`.
    pub fn decade_for_age(&self, age: u32) -> Option<DecadePeriod> {
        self.decades().into_iter().find(|d| d.contains_age(age))
    }

    /// Periods named by a selection.
    pub fn resolve(&self, selection: &Selection) -> ResolvedSelection {
        let decade = selection.decade().and_then(|k| self.decade(k));
        let annual = decade.and_then(|d| {
            selection
                .annual()
                .and_then(|j| d.annual(j, self.year_branch, self.gender().is_male()))
        });
        let minor_limit = annual
            .filter(|_| selection.minor_limit_active())
            .map(|a| MinorLimit {
                branch: a.minor_limit,
                stem: self.palace(a.minor_limit).stem,
            });
        ResolvedSelection {
            decade,
            annual,
            minor_limit,
        }
    }

    /// Re-tag sihua for a selection and return the resolved periods.
    pub fn apply_selection(&mut self, selection: &Selection) -> ResolvedSelection {
        let resolved = self.resolve(selection);
        apply_sihua_layers(
            self,
            resolved.decade.map(|d| d.stem),
            resolved.annual.map(|a| a.stem),
            resolved.minor_limit.map(|m| m.stem),
        );
        resolved
    }

    /// Flow stars for a selection; the chart is not modified.
    pub fn flow_stars(&self, selection: &Selection) -> Vec<FlowStar> {
        flow_stars(&self.resolve(selection))
    }
}

fn lunar_error(e: CalendarError) -> ChartError {
    match e {
        CalendarError::InvalidLunar(msg) => ChartError::InvalidLunarDate(msg),
        other => ChartError::DateConversion(other),
    }
}

/// Lunar year whose stem/branch match the adapter's year pillar.
fn lunar_birth_year(gregorian_year: i32, stem: Stem, branch: Branch) -> Result<i32, ChartError> {
    [gregorian_year, gregorian_year - 1]
        .into_iter()
        .find(|&y| annual_stem_branch(y) == (stem, branch))
        .ok_or(ChartError::InvalidLunarDate(
            "year stem/branch matches neither the birth year nor the year before",
        ))
}

/// Build a chart for `input`, obtaining lunar facts from `adapter`.
#[tracing::instrument(skip_all, fields(year = input.year, month = input.month, day = input.day))]
pub fn build_chart(
    input: &BirthInput,
    adapter: &impl LunarAdapter,
    config: &ChartConfig,
) -> Result<Chart, ChartError> {
    input.validate()?;
    let raw: LunarDate = adapter.convert(&input.to_gregorian())?;
    raw.validate().map_err(lunar_error)?;

    let year_stem = Stem::try_from_index(raw.year_stem)
        .ok_or(ChartError::InvalidLunarDate("year stem out of range"))?;
    let year_branch = Branch::try_from_index(raw.year_branch)
        .ok_or(ChartError::InvalidLunarDate("year branch out of range"))?;
    let time_branch = Branch::try_from_index(raw.time_branch)
        .ok_or(ChartError::InvalidLunarDate("time branch out of range"))?;
    let lunar_year = lunar_birth_year(input.year, year_stem, year_branch)?;
    let month = config
        .leap_month
        .normalise(raw.month_number(), raw.is_leap_month(), raw.day);
    if raw.is_leap_month() {
        debug!(raw = raw.month, month, policy = ?config.leap_month, "leap month normalised");
    }
    let lunar = LunarFacts {
        month,
        day: raw.day,
        is_leap: raw.is_leap_month(),
        time_branch,
    };

    let natal = natal_palace_branch(month, time_branch);
    let body = body_palace_branch(month, time_branch);
    let names = palace_names(natal);
    let stems = palace_stems(year_stem);
    let bureau = bureau_for(stems[natal.index() as usize], natal);
    let direction = decade_direction(year_stem, input.gender.is_male());
    debug!(
        natal = natal.name(),
        body = body.name(),
        bureau = bureau.name(),
        direction = direction.name(),
        "layout"
    );

    let mut stars: [Vec<Star>; 12] = Default::default();
    let main = main_star_positions(bureau, lunar.day);
    debug!(ziwei = main[0].1.name(), tianfu = main[6].1.name(), "main stars");
    for (star, branch) in main {
        stars[branch.index() as usize].push(Star::new(star.name(), StarCategory::Main));
    }

    let facts = PlacementFacts {
        year_stem,
        year_branch,
        month,
        day: lunar.day,
        time_branch,
        natal,
        body,
    };
    let auxiliaries = important_stars(&facts, config.kui_yue, config.tian_ma)
        .into_iter()
        .chain(minor_stars(&facts));
    for placed in auxiliaries {
        stars[placed.branch.index() as usize].push(Star::new(placed.name, placed.category));
    }

    let cycles = [
        (
            DeityCycle::Boshi,
            lay_cycle(DeityCycle::Boshi, lucun_branch(year_stem), direction.step()),
        ),
        (DeityCycle::SuiQian, lay_cycle(DeityCycle::SuiQian, year_branch, 1)),
        (
            DeityCycle::JiangQian,
            lay_cycle(DeityCycle::JiangQian, jiangqian_anchor(year_branch), 1),
        ),
    ];
    for (cycle, laid) in cycles {
        for (slot, name) in stars.iter_mut().zip(laid) {
            slot.push(Star::new(name, StarCategory::Deity(cycle)));
        }
    }

    let stages = life_stages(bureau, direction);
    let windows = age_windows(natal, bureau, direction);
    let palaces = ALL_BRANCHES.map(|branch| {
        let i = branch.index() as usize;
        Palace {
            branch,
            stem: stems[i],
            name: names[i],
            is_body: branch == body,
            stars: std::mem::take(&mut stars[i]),
            age_start: windows[i].0,
            age_end: windows[i].1,
            life_stage: stages[i],
        }
    });

    let mut chart = Chart {
        palaces,
        bureau,
        year_stem,
        year_branch,
        natal,
        body,
        input: *input,
        lunar_year,
        lunar,
        direction,
        ming_zhu: ming_zhu(natal),
        shen_zhu: shen_zhu(year_branch),
    };
    apply_sihua(&mut chart, None, None);
    Ok(chart)
}
