//! Auxiliary star placement (六吉, 六煞, 祿馬 and the 雜曜).
//!
//! Every rule is either a lookup in one of the tables below or a fixed offset
//! from an anchor branch. Inputs are the normalised lunar facts plus the
//! Natal and Body palace branches.

use crate::config::{KuiYueRule, TianMaBasis};
use crate::ganzhi::{Branch, Stem};
use crate::palace::{MONTH_ONE_BRANCH, PalaceName, branch_of_name};
use crate::star::StarCategory;

use Branch::*;

/// 祿存 by year stem.
pub const LUCUN_BY_STEM: [Branch; 10] = [Yin, Mao, Si, Wu, Si, Wu, Shen, You, Hai, Zi];

/// (天魁, 天鉞) by year stem, 辛 at (寅, 午).
pub const KUI_YUE_XIN_TIGER_HORSE: [(Branch, Branch); 10] = [
    (Chou, Wei),
    (Zi, Shen),
    (Hai, You),
    (Hai, You),
    (Chou, Wei),
    (Zi, Shen),
    (Chou, Wei),
    (Yin, Wu),
    (Mao, Si),
    (Mao, Si),
];

/// (天魁, 天鉞) by year stem, 辛 at (午, 寅).
pub const KUI_YUE_XIN_HORSE_TIGER: [(Branch, Branch); 10] = [
    (Chou, Wei),
    (Zi, Shen),
    (Hai, You),
    (Hai, You),
    (Chou, Wei),
    (Zi, Shen),
    (Chou, Wei),
    (Wu, Yin),
    (Mao, Si),
    (Mao, Si),
];

/// (火星, 鈴星) anchors by trine group (申子辰, 巳酉丑, 寅午戌, 亥卯未),
/// before adding the time branch.
pub const HUO_LING_ANCHORS: [(Branch, Branch); 4] = [(Yin, Xu), (Mao, Xu), (Chou, Mao), (You, Xu)];

/// 天馬 by trine group: the branch opposite the group's 長生.
pub const TIANMA_BY_TRINE: [Branch; 4] = [Yin, Hai, Shen, Si];

/// 天官 by year stem.
pub const TIANGUAN_BY_STEM: [Branch; 10] = [Wei, Chen, Si, Yin, Mao, You, Hai, You, Xu, Wu];
/// 天福 by year stem.
pub const TIANFU_STAR_BY_STEM: [Branch; 10] = [You, Shen, Zi, Hai, Mao, Yin, Wu, Si, Wu, Si];
/// 天廚 by year stem.
pub const TIANCHU_BY_STEM: [Branch; 10] = [Si, Wu, Zi, Si, Wu, Shen, Yin, Wu, You, Hai];

/// 孤辰 by year branch.
pub const GUCHEN_BY_YEAR_BRANCH: [Branch; 12] =
    [Yin, Yin, Si, Si, Si, Shen, Shen, Shen, Hai, Hai, Hai, Yin];
/// 破碎 by year branch modulo 3.
pub const POSUI_BY_YEAR_BRANCH_MOD3: [Branch; 3] = [Si, Chou, You];

/// 天月 by lunar month.
pub const TIANYUE_BY_MONTH: [Branch; 12] = [Xu, Si, Chen, Yin, Wei, Mao, Hai, Wei, Yin, Wu, Xu, Yin];
/// 天巫 by lunar month modulo 4 (months 4/8/12, 1/5/9, 2/6/10, 3/7/11).
pub const TIANWU_BY_MONTH_MOD4: [Branch; 4] = [Hai, Si, Shen, Yin];
/// 解神 by lunar month.
pub const JIESHEN_BY_MONTH: [Branch; 12] = [Shen, Shen, Xu, Xu, Zi, Zi, Yin, Yin, Chen, Chen, Wu, Wu];

/// A star with its branch, before it is attached to a palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedStar {
    pub name: &'static str,
    pub category: StarCategory,
    pub branch: Branch,
}

/// Facts that auxiliary placement depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementFacts {
    pub year_stem: Stem,
    pub year_branch: Branch,
    /// Normalised lunar month 1..=12.
    pub month: u8,
    /// Lunar day 1..=30.
    pub day: u8,
    pub time_branch: Branch,
    pub natal: Branch,
    pub body: Branch,
}

impl PlacementFacts {
    /// Branch of the lunar month (month 1 = 寅).
    pub const fn month_branch(&self) -> Branch {
        MONTH_ONE_BRANCH.offset(self.month as i32 - 1)
    }

    const fn m(&self) -> i32 {
        self.month as i32 - 1
    }

    const fn h(&self) -> i32 {
        self.time_branch.index() as i32
    }

    const fn y(&self) -> i32 {
        self.year_branch.index() as i32
    }
}

/// 祿存 branch for a stem; also used for the decade and annual flow 祿.
pub const fn lucun_branch(stem: Stem) -> Branch {
    LUCUN_BY_STEM[stem.index() as usize]
}

/// (天魁, 天鉞) for a year stem under a rule.
pub const fn kui_yue_branches(stem: Stem, rule: KuiYueRule) -> (Branch, Branch) {
    let table = match rule {
        KuiYueRule::XinTigerHorse => &KUI_YUE_XIN_TIGER_HORSE,
        KuiYueRule::XinHorseTiger => &KUI_YUE_XIN_HORSE_TIGER,
    };
    table[stem.index() as usize]
}

/// 天馬 branch for the chosen basis.
pub const fn tianma_branch(facts: &PlacementFacts, basis: TianMaBasis) -> Branch {
    let key = match basis {
        TianMaBasis::MonthBranch => facts.month_branch(),
        TianMaBasis::YearBranch => facts.year_branch,
    };
    TIANMA_BY_TRINE[key.trine_group() as usize]
}

/// 紅鸞 branch for a year branch; 天喜 sits opposite.
pub const fn hongluan_branch(year_branch: Branch) -> Branch {
    Mao.offset(-(year_branch.index() as i32))
}

/// The 14 important auxiliaries: 六吉, 祿存, 天馬, 六煞.
pub fn important_stars(
    facts: &PlacementFacts,
    kui_yue: KuiYueRule,
    tian_ma: TianMaBasis,
) -> Vec<PlacedStar> {
    let (kui, yue) = kui_yue_branches(facts.year_stem, kui_yue);
    let lucun = lucun_branch(facts.year_stem);
    let (huo, ling) = HUO_LING_ANCHORS[facts.year_branch.trine_group() as usize];
    let h = facts.h();
    let placed = [
        ("左輔", Chen.offset(facts.m())),
        ("右弼", Xu.offset(-facts.m())),
        ("文昌", Xu.offset(-h)),
        ("文曲", Chen.offset(h)),
        ("天魁", kui),
        ("天鉞", yue),
        ("祿存", lucun),
        ("天馬", tianma_branch(facts, tian_ma)),
        ("擎羊", lucun.offset(1)),
        ("陀羅", lucun.offset(-1)),
        ("火星", huo.offset(h)),
        ("鈴星", ling.offset(h)),
        ("地空", Hai.offset(-h)),
        ("地劫", Hai.offset(h)),
    ];
    placed
        .into_iter()
        .map(|(name, branch)| PlacedStar {
            name,
            category: StarCategory::AuxiliaryImportant,
            branch,
        })
        .collect()
}

/// The miscellaneous stars (雜曜).
pub fn minor_stars(facts: &PlacementFacts) -> Vec<PlacedStar> {
    let ys = facts.year_stem.index() as usize;
    let yz = facts.y();
    let m = facts.m();
    let h = facts.h();
    let d = facts.day as i32;

    let wenchang = Xu.offset(-h);
    let wenqu = Chen.offset(h);
    let zuofu = Chen.offset(m);
    let youbi = Xu.offset(-m);

    // 截空: yang stems take the first branch of the pair, yin the second.
    let jiekong = Zi.offset(8 - (ys as i32 % 5) * 2 + (ys as i32 % 2));
    let hongluan = hongluan_branch(facts.year_branch);
    let guchen = GUCHEN_BY_YEAR_BRANCH[yz as usize];

    let placed = [
        ("恩光", wenchang.offset(d - 2)),
        ("天貴", wenqu.offset(d - 2)),
        ("三台", zuofu.offset(d - 1)),
        ("八座", youbi.offset(1 - d)),
        ("截空", jiekong),
        ("旬空", Zi.offset(yz - ys as i32 - 2)),
        ("破碎", POSUI_BY_YEAR_BRANCH_MOD3[(yz % 3) as usize]),
        ("蜚廉", Zi.offset(yz + 8)),
        ("天虛", Wu.offset(yz)),
        ("天哭", Wu.offset(-yz)),
        ("龍池", Chen.offset(yz)),
        ("鳳閣", Xu.offset(-yz)),
        ("紅鸞", hongluan),
        ("天喜", hongluan.offset(6)),
        ("天才", facts.natal.offset(yz)),
        ("天壽", facts.body.offset(yz)),
        ("孤辰", guchen),
        ("寡宿", guchen.offset(-4)),
        ("天官", TIANGUAN_BY_STEM[ys]),
        ("天福", TIANFU_STAR_BY_STEM[ys]),
        ("天廚", TIANCHU_BY_STEM[ys]),
        ("天空", facts.year_branch.offset(1)),
        ("天刑", You.offset(m)),
        ("天姚", Chou.offset(m)),
        ("天月", TIANYUE_BY_MONTH[m as usize]),
        ("陰煞", Yin.offset(-2 * m)),
        ("天巫", TIANWU_BY_MONTH_MOD4[(facts.month % 4) as usize]),
        ("解神", JIESHEN_BY_MONTH[m as usize]),
        ("月德", Si.offset(m)),
        ("臺輔", Wu.offset(h)),
        ("封誥", Yin.offset(h)),
        ("天傷", branch_of_name(facts.natal, PalaceName::Friends)),
        ("天使", branch_of_name(facts.natal, PalaceName::Health)),
    ];
    placed
        .into_iter()
        .map(|(name, branch)| PlacedStar {
            name,
            category: StarCategory::AuxiliaryMinor,
            branch,
        })
        .collect()
}
