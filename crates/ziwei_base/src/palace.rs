//! Palace layout: Natal and Body palaces, semantic names, and palace stems.
//!
//! The 12 palaces sit on the fixed branch circle. The Natal Palace (命宮) is
//! found by counting the lunar month forward from 寅 and the time branch
//! backward; the Body Palace (身宮) counts the time branch forward instead.
//! The remaining names follow counter-clockwise from the Natal Palace.
//!
//! Palace stems use the "Five Tiger" (五虎遁) rule keyed by the year stem.

use serde::{Deserialize, Serialize};

use crate::ganzhi::{ALL_BRANCHES, Branch, Stem};
use crate::life_stage::LifeStage;
use crate::star::{Star, StarCategory};

/// Branch where lunar month 1 begins (寅).
pub const MONTH_ONE_BRANCH: Branch = Branch::Yin;

/// The 12 semantic palace names, in counter-clockwise order from the Natal Palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PalaceName {
    Ming,
    Siblings,
    Spouse,
    Children,
    Wealth,
    Health,
    Travel,
    Friends,
    Career,
    Property,
    Fortune,
    Parents,
}

/// Palace names in layout order (index 0 = 命宮).
pub const PALACE_NAMES: [PalaceName; 12] = [
    PalaceName::Ming,
    PalaceName::Siblings,
    PalaceName::Spouse,
    PalaceName::Children,
    PalaceName::Wealth,
    PalaceName::Health,
    PalaceName::Travel,
    PalaceName::Friends,
    PalaceName::Career,
    PalaceName::Property,
    PalaceName::Fortune,
    PalaceName::Parents,
];

impl PalaceName {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ming => "命宮",
            Self::Siblings => "兄弟",
            Self::Spouse => "夫妻",
            Self::Children => "子女",
            Self::Wealth => "財帛",
            Self::Health => "疾厄",
            Self::Travel => "遷移",
            Self::Friends => "僕役",
            Self::Career => "官祿",
            Self::Property => "田宅",
            Self::Fortune => "福德",
            Self::Parents => "父母",
        }
    }

    /// First character, used for overlay labels such as 大命 or 流財.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Ming => "命",
            Self::Siblings => "兄",
            Self::Spouse => "夫",
            Self::Children => "子",
            Self::Wealth => "財",
            Self::Health => "疾",
            Self::Travel => "遷",
            Self::Friends => "僕",
            Self::Career => "官",
            Self::Property => "田",
            Self::Fortune => "福",
            Self::Parents => "父",
        }
    }

    /// Position in [`PALACE_NAMES`].
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// One of the 12 palaces of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palace {
    pub branch: Branch,
    pub stem: Stem,
    pub name: PalaceName,
    /// Whether the Body Palace (身宮) coincides with this palace.
    pub is_body: bool,
    pub stars: Vec<Star>,
    /// First age of this palace's decade.
    pub age_start: u32,
    /// Last age of this palace's decade.
    pub age_end: u32,
    pub life_stage: LifeStage,
}

impl Palace {
    /// Stars of one category, in placement order.
    pub fn stars_of(&self, category: StarCategory) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(move |s| s.category == category)
    }

    pub fn main_stars(&self) -> impl Iterator<Item = &Star> {
        self.stars_of(StarCategory::Main)
    }

    pub fn has_star(&self, name: &str) -> bool {
        self.stars.iter().any(|s| s.name == name)
    }

    /// Whether no main star sits in this palace (空宮).
    pub fn is_empty_of_main(&self) -> bool {
        self.main_stars().next().is_none()
    }
}

/// Natal Palace (命宮): month counted forward from 寅, time branch backward.
///
/// `month` is the normalised lunar month 1..=12.
pub const fn natal_palace_branch(month: u8, time_branch: Branch) -> Branch {
    MONTH_ONE_BRANCH.offset(month as i32 - 1 - time_branch.index() as i32)
}

/// Body Palace (身宮): month counted forward from 寅, time branch forward.
pub const fn body_palace_branch(month: u8, time_branch: Branch) -> Branch {
    MONTH_ONE_BRANCH.offset(month as i32 - 1 + time_branch.index() as i32)
}

/// Semantic name of every branch, indexed by branch.
pub fn palace_names(natal: Branch) -> [PalaceName; 12] {
    let mut names = [PalaceName::Ming; 12];
    for (i, &name) in PALACE_NAMES.iter().enumerate() {
        names[natal.offset(-(i as i32)).index() as usize] = name;
    }
    names
}

/// Name of `branch` when `anchor` is treated as the 命宮 of an overlay
/// (decade or annual palace).
pub const fn relative_palace_name(anchor: Branch, branch: Branch) -> PalaceName {
    PALACE_NAMES[anchor.steps_from(branch) as usize]
}

/// Stem that the Five Tiger rule assigns to 寅 for a year stem.
pub const fn five_tiger_start(year_stem: Stem) -> Stem {
    Stem::from_index((year_stem.index() % 5) * 2 + 2)
}

/// Palace stems by branch under the Five Tiger rule.
pub fn palace_stems(year_stem: Stem) -> [Stem; 12] {
    let start = five_tiger_start(year_stem).index();
    let mut stems = [Stem::Jia; 12];
    for (slot, branch) in stems.iter_mut().zip(ALL_BRANCHES) {
        *slot = Stem::from_index(start + branch.steps_from(MONTH_ONE_BRANCH));
    }
    stems
}

/// Branch bearing a given semantic name.
pub fn branch_of_name(natal: Branch, name: PalaceName) -> Branch {
    natal.offset(-(name.index() as i32))
}
