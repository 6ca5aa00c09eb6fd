//! Five-Element Bureau (五行局) classification.
//!
//! The bureau is the 納音 element of the Natal Palace stem/branch pair. It is
//! reproduced as a literal table: rows are stem pairs (甲乙, 丙丁, 戊己, 庚辛,
//! 壬癸), columns are branches 子..亥.

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Stem};

/// The five bureaus, numbered by the ages at which their first decade begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bureau {
    Water2,
    Wood3,
    Metal4,
    Earth5,
    Fire6,
}

/// All bureaus in numeric order.
pub const ALL_BUREAUS: [Bureau; 5] = [
    Bureau::Water2,
    Bureau::Wood3,
    Bureau::Metal4,
    Bureau::Earth5,
    Bureau::Fire6,
];

impl Bureau {
    /// Bureau number (2..=6).
    pub const fn number(self) -> u8 {
        match self {
            Self::Water2 => 2,
            Self::Wood3 => 3,
            Self::Metal4 => 4,
            Self::Earth5 => 5,
            Self::Fire6 => 6,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water2 => "水二局",
            Self::Wood3 => "木三局",
            Self::Metal4 => "金四局",
            Self::Earth5 => "土五局",
            Self::Fire6 => "火六局",
        }
    }

    /// Bureau for a number 2..=6.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            2 => Some(Self::Water2),
            3 => Some(Self::Wood3),
            4 => Some(Self::Metal4),
            5 => Some(Self::Earth5),
            6 => Some(Self::Fire6),
            _ => None,
        }
    }
}

const W2: Bureau = Bureau::Water2;
const T3: Bureau = Bureau::Wood3;
const M4: Bureau = Bureau::Metal4;
const E5: Bureau = Bureau::Earth5;
const F6: Bureau = Bureau::Fire6;

/// Bureau by stem pair (row) and branch (column).
pub const BUREAU_TABLE: [[Bureau; 12]; 5] = [
    // 甲乙: 海中金 大溪水 覆燈火 沙中金 泉中水 山頭火
    [M4, M4, W2, W2, F6, F6, M4, M4, W2, W2, F6, F6],
    // 丙丁: 澗下水 爐中火 沙中土 天河水 山下火 屋上土
    [W2, W2, F6, F6, E5, E5, W2, W2, F6, F6, E5, E5],
    // 戊己: 霹靂火 城頭土 大林木 天上火 大驛土 平地木
    [F6, F6, E5, E5, T3, T3, F6, F6, E5, E5, T3, T3],
    // 庚辛: 壁上土 松柏木 白蠟金 路旁土 石榴木 釵釧金
    [E5, E5, T3, T3, M4, M4, E5, E5, T3, T3, M4, M4],
    // 壬癸: 桑柘木 金箔金 長流水 楊柳木 劍鋒金 大海水
    [T3, T3, M4, M4, W2, W2, T3, T3, M4, M4, W2, W2],
];

/// Classify the Natal Palace stem/branch.
pub const fn bureau_for(stem: Stem, branch: Branch) -> Bureau {
    BUREAU_TABLE[(stem.index() / 2) as usize][branch.index() as usize]
}
