//! Ruling stars (命主, 身主) and the flat chart summary record.

use serde::{Deserialize, Serialize};

use crate::chart::{BirthInput, Chart, Gender};
use crate::ganzhi::Branch;

/// 命主 by Natal Palace branch.
pub const MING_ZHU_BY_BRANCH: [&str; 12] = [
    "貪狼", "巨門", "祿存", "文曲", "廉貞", "武曲", "破軍", "武曲", "廉貞", "文曲", "祿存", "巨門",
];

/// 身主 by year branch.
pub const SHEN_ZHU_BY_YEAR_BRANCH: [&str; 12] = [
    "鈴星", "天相", "天梁", "天同", "文昌", "天機", "鈴星", "天相", "天梁", "天同", "文昌", "天機",
];

pub const fn ming_zhu(natal: Branch) -> &'static str {
    MING_ZHU_BY_BRANCH[natal.index() as usize]
}

pub const fn shen_zhu(year_branch: Branch) -> &'static str {
    SHEN_ZHU_BY_YEAR_BRANCH[year_branch.index() as usize]
}

/// The record a front end persists for a chart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub gender: Gender,
    /// Bureau display name, e.g. `水二局`.
    pub bureau: String,
    /// First main star of the Natal Palace, absent for an empty palace.
    pub natal_main_star: Option<String>,
    /// Natal Palace branch character.
    pub natal_palace: String,
}

impl ChartSummary {
    pub fn from_chart(chart: &Chart) -> Self {
        let BirthInput {
            year,
            month,
            day,
            hour,
            minute,
            gender,
        } = chart.input;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            gender,
            bureau: chart.bureau.name().to_string(),
            natal_main_star: chart.natal_main_star().map(str::to_string),
            natal_palace: chart.natal.name().to_string(),
        }
    }
}
