//! Heavenly stems (天干), earthly branches (地支), and the annual cycle.
//!
//! The 10 stems and 12 branches interleave to form the 60-term sexagenary
//! calendar. Branch indices double as palace positions on the chart
//! (0 = 子 .. 11 = 亥), so all palace arithmetic is modulo-12 arithmetic on
//! [`Branch`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The 10 heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// Chinese character.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "甲",
            Self::Yi => "乙",
            Self::Bing => "丙",
            Self::Ding => "丁",
            Self::Wu => "戊",
            Self::Ji => "己",
            Self::Geng => "庚",
            Self::Xin => "辛",
            Self::Ren => "壬",
            Self::Gui => "癸",
        }
    }

    /// Pinyin romanisation.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Jia => "Jia",
            Self::Yi => "Yi",
            Self::Bing => "Bing",
            Self::Ding => "Ding",
            Self::Wu => "Wu",
            Self::Ji => "Ji",
            Self::Geng => "Geng",
            Self::Xin => "Xin",
            Self::Ren => "Ren",
            Self::Gui => "Gui",
        }
    }

    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem for an index; wraps modulo 10.
    pub const fn from_index(index: u8) -> Self {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Stem for an index, or `None` outside 0..=9.
    pub const fn try_from_index(index: u8) -> Option<Self> {
        if index < 10 {
            Some(ALL_STEMS[index as usize])
        } else {
            None
        }
    }

    /// Yang stems are the even-indexed ones (甲 丙 戊 庚 壬).
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Look up a stem by its Chinese character.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_STEMS.iter().copied().find(|s| s.name() == name)
    }
}

/// The 12 earthly branches, which are also the 12 fixed palace positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese character.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Pinyin romanisation.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Zi => "Zi",
            Self::Chou => "Chou",
            Self::Yin => "Yin",
            Self::Mao => "Mao",
            Self::Chen => "Chen",
            Self::Si => "Si",
            Self::Wu => "Wu",
            Self::Wei => "Wei",
            Self::Shen => "Shen",
            Self::You => "You",
            Self::Xu => "Xu",
            Self::Hai => "Hai",
        }
    }

    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch for an index; wraps modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_BRANCHES[(index % 12) as usize]
    }

    /// Branch for an index, or `None` outside 0..=11.
    pub const fn try_from_index(index: u8) -> Option<Self> {
        if index < 12 {
            Some(ALL_BRANCHES[index as usize])
        } else {
            None
        }
    }

    /// Move `steps` positions around the circle (negative = counter-clockwise).
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }

    /// Forward distance from `from` to `self`, in 0..12.
    pub const fn steps_from(self, from: Branch) -> u8 {
        (self.index() as i32 - from.index() as i32).rem_euclid(12) as u8
    }

    /// Trine group (三合) index: 申子辰 = 0, 巳酉丑 = 1, 寅午戌 = 2, 亥卯未 = 3.
    pub const fn trine_group(self) -> u8 {
        self.index() % 4
    }

    /// Look up a branch by its Chinese character.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_BRANCHES.iter().copied().find(|b| b.name() == name)
    }
}

/// Reference year for the annual cycle: CE 1984 = 甲子.
pub const GANZHI_EPOCH_YEAR: i32 = 1984;

/// Stem and branch of a Gregorian year, counted from the 1984 甲子 anchor.
///
/// Defined for every `i32`, including years before the anchor.
pub const fn annual_stem_branch(year: i32) -> (Stem, Branch) {
    let offset = year as i64 - GANZHI_EPOCH_YEAR as i64;
    (
        Stem::from_index(offset.rem_euclid(10) as u8),
        Branch::from_index(offset.rem_euclid(12) as u8),
    )
}

/// Position (0..60) of a stem/branch pair in the sexagenary cycle, or `None`
/// when stem and branch parity differ.
pub const fn sexagenary_index(stem: Stem, branch: Branch) -> Option<u8> {
    let s = stem.index();
    let b = branch.index();
    if s % 2 != b % 2 {
        return None;
    }
    // Solve i ≡ s (mod 10), i ≡ b (mod 12) over 0..60.
    let mut i = s;
    while i < 60 {
        if i % 12 == b {
            return Some(i);
        }
        i += 10;
    }
    None
}

/// Parse a two-character 干支 label such as `"己未"`.
pub fn parse_ganzhi(label: &str) -> Option<(Stem, Branch)> {
    let mut chars = label.chars();
    let stem_ch = chars.next()?;
    let branch_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let stem = Stem::from_name(stem_ch.encode_utf8(&mut [0u8; 4]))?;
    let branch = Branch::from_name(branch_ch.encode_utf8(&mut [0u8; 4]))?;
    sexagenary_index(stem, branch)?;
    Some((stem, branch))
}

/// Interpret an overlay stem passed with the `-1 = none` sentinel.
pub fn stem_from_sentinel(value: i32) -> Result<Option<Stem>, ValidationError> {
    match value {
        -1 => Ok(None),
        0..=9 => Ok(Some(Stem::from_index(value as u8))),
        _ => Err(ValidationError::StemOutOfRange(value)),
    }
}
