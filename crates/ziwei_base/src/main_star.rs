//! Placement of the 14 main stars.
//!
//! Zi Wei is located from the bureau number and the lunar day by the
//! quotient/complement rule; five companions follow at fixed counter-clockwise
//! offsets. Tian Fu mirrors Zi Wei across the 寅–申 axis (their branches sum to
//! 4 modulo 12) and carries seven companions at fixed clockwise offsets.

use crate::bureau::Bureau;
use crate::ganzhi::Branch;
use crate::star::MainStar;

/// Companions of Zi Wei and their step offsets (negative = counter-clockwise).
pub const ZIWEI_COMPANION_OFFSETS: [(MainStar, i32); 6] = [
    (MainStar::ZiWei, 0),
    (MainStar::TianJi, -1),
    (MainStar::TaiYang, -3),
    (MainStar::WuQu, -4),
    (MainStar::TianTong, -5),
    (MainStar::LianZhen, -8),
];

/// Companions of Tian Fu and their clockwise step offsets.
pub const TIANFU_COMPANION_OFFSETS: [(MainStar, i32); 8] = [
    (MainStar::TianFu, 0),
    (MainStar::TaiYin, 1),
    (MainStar::TanLang, 2),
    (MainStar::JuMen, 3),
    (MainStar::TianXiang, 4),
    (MainStar::TianLiang, 5),
    (MainStar::QiSha, 6),
    (MainStar::PoJun, 10),
];

/// Branch of Zi Wei for a bureau and lunar day (1..=30).
pub const fn ziwei_branch(bureau: Bureau, lunar_day: u8) -> Branch {
    let b = bureau.number() as i32;
    let d = lunar_day as i32;
    // Counting starts at 寅 with quotient 1.
    let start = Branch::Yin;
    if d % b == 0 {
        let q = d / b;
        start.offset(q - 1)
    } else {
        let complement = b - d % b;
        let q = (d + complement) / b;
        if complement % 2 == 1 {
            start.offset(q - 1 - complement)
        } else {
            start.offset(q - 1 + complement)
        }
    }
}

/// Branch of Tian Fu given Zi Wei's branch.
pub const fn tianfu_branch(ziwei: Branch) -> Branch {
    Branch::Chen.offset(-(ziwei.index() as i32))
}

/// All 14 main stars with their branches, Zi Wei group first.
pub fn main_star_positions(bureau: Bureau, lunar_day: u8) -> [(MainStar, Branch); 14] {
    let zw = ziwei_branch(bureau, lunar_day);
    let tf = tianfu_branch(zw);
    let mut out = [(MainStar::ZiWei, Branch::Zi); 14];
    let ziwei_group = ZIWEI_COMPANION_OFFSETS
        .iter()
        .map(|&(star, step)| (star, zw.offset(step)));
    let tianfu_group = TIANFU_COMPANION_OFFSETS
        .iter()
        .map(|&(star, step)| (star, tf.offset(step)));
    for (slot, placed) in out.iter_mut().zip(ziwei_group.chain(tianfu_group)) {
        *slot = placed;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bureau::ALL_BUREAUS;

    #[test]
    fn divisible_day() {
        // Water 2, day 6: q = 3 → 寅 + 2 = 辰
        assert_eq!(ziwei_branch(Bureau::Water2, 6), Branch::Chen);
        // Fire 6, day 6: q = 1 → 寅
        assert_eq!(ziwei_branch(Bureau::Fire6, 6), Branch::Yin);
    }

    #[test]
    fn odd_complement_steps_back() {
        // Wood 3, day 1: r = 1, c = 2 (even) → q = 1 → 寅 + 0 + 2 = 辰
        assert_eq!(ziwei_branch(Bureau::Wood3, 1), Branch::Chen);
        // Wood 3, day 2: r = 2, c = 1 (odd) → q = 1 → 寅 - 1 = 丑
        assert_eq!(ziwei_branch(Bureau::Wood3, 2), Branch::Chou);
    }

    #[test]
    fn even_complement_steps_forward() {
        // Earth 5, day 11: r = 1, c = 4, q = 3 → 寅 + 2 + 4 = 申
        assert_eq!(ziwei_branch(Bureau::Earth5, 11), Branch::Shen);
    }

    #[test]
    fn day_one_positions() {
        // Classic day-1 positions: 水二丑, 木三辰, 金四亥, 土五午, 火六酉
        assert_eq!(ziwei_branch(Bureau::Water2, 1), Branch::Chou);
        assert_eq!(ziwei_branch(Bureau::Wood3, 1), Branch::Chen);
        assert_eq!(ziwei_branch(Bureau::Metal4, 1), Branch::Hai);
        assert_eq!(ziwei_branch(Bureau::Earth5, 1), Branch::Wu);
        assert_eq!(ziwei_branch(Bureau::Fire6, 1), Branch::You);
    }

    #[test]
    fn tianfu_mirror_sums_to_four() {
        for bureau in ALL_BUREAUS {
            for day in 1..=30u8 {
                let zw = ziwei_branch(bureau, day);
                let tf = tianfu_branch(zw);
                assert_eq!((zw.index() + tf.index()) % 12, 4, "{bureau:?} day {day}");
            }
        }
    }

    #[test]
    fn fourteen_distinct_stars() {
        let placed = main_star_positions(Bureau::Metal4, 17);
        let mut stars: Vec<MainStar> = placed.iter().map(|&(s, _)| s).collect();
        stars.sort_by_key(|s| s.name());
        stars.dedup();
        assert_eq!(stars.len(), 14);
    }

    #[test]
    fn ziwei_and_tianfu_share_yin_shen_axis() {
        // Zi Wei at 寅 → Tian Fu also at 寅
        assert_eq!(tianfu_branch(Branch::Yin), Branch::Yin);
        assert_eq!(tianfu_branch(Branch::Shen), Branch::Shen);
        assert_eq!(tianfu_branch(Branch::Zi), Branch::Chen);
    }
}
