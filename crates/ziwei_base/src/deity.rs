//! The three 12-position deity cycles (博士, 歲前, 將前).
//!
//! Each cycle lays one name on every palace, starting from an anchor branch.
//! 博士 follows the decade direction; the other two always run clockwise.

use serde::{Deserialize, Serialize};

use crate::ganzhi::Branch;

/// Which deity cycle a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeityCycle {
    /// 博士十二神, anchored on 祿存.
    Boshi,
    /// 歲前十二神, anchored on the year branch.
    SuiQian,
    /// 將前十二神, anchored by the year-branch trine.
    JiangQian,
}

pub const ALL_DEITY_CYCLES: [DeityCycle; 3] =
    [DeityCycle::Boshi, DeityCycle::SuiQian, DeityCycle::JiangQian];

pub const BOSHI_NAMES: [&str; 12] = [
    "博士", "力士", "青龍", "小耗", "將軍", "奏書", "飛廉", "喜神", "病符", "大耗", "伏兵", "官府",
];

pub const SUIQIAN_NAMES: [&str; 12] = [
    "歲建", "晦氣", "喪門", "貫索", "官符", "小耗", "大耗", "龍德", "白虎", "天德", "吊客", "病符",
];

pub const JIANGQIAN_NAMES: [&str; 12] = [
    "將星", "攀鞍", "歲驛", "息神", "華蓋", "劫煞", "災煞", "天煞", "指背", "咸池", "月煞", "亡神",
];

/// 將星 branch by year-branch trine group (申子辰, 巳酉丑, 寅午戌, 亥卯未).
pub const JIANGXING_BY_TRINE: [Branch; 4] = [Branch::Zi, Branch::You, Branch::Wu, Branch::Mao];

impl DeityCycle {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boshi => "博士十二神",
            Self::SuiQian => "歲前十二神",
            Self::JiangQian => "將前十二神",
        }
    }

    /// The 12 names in cycle order.
    pub const fn names(self) -> &'static [&'static str; 12] {
        match self {
            Self::Boshi => &BOSHI_NAMES,
            Self::SuiQian => &SUIQIAN_NAMES,
            Self::JiangQian => &JIANGQIAN_NAMES,
        }
    }
}

/// Lay a cycle onto the circle: entry `i` of the result is the name at
/// branch index `i`. `step` is +1 or -1.
pub fn lay_cycle(cycle: DeityCycle, anchor: Branch, step: i32) -> [&'static str; 12] {
    let mut out = [""; 12];
    for (i, &name) in cycle.names().iter().enumerate() {
        out[anchor.offset(i as i32 * step).index() as usize] = name;
    }
    out
}

/// Anchor of the 將前 cycle for a year branch.
pub const fn jiangqian_anchor(year_branch: Branch) -> Branch {
    JIANGXING_BY_TRINE[year_branch.trine_group() as usize]
}
