//! The 12 life stages (長生十二神).

use serde::{Deserialize, Serialize};

use crate::bureau::Bureau;
use crate::decade::Direction;
use crate::ganzhi::Branch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    ChangSheng,
    MuYu,
    GuanDai,
    LinGuan,
    DiWang,
    Shuai,
    Bing,
    Si,
    Mu,
    Jue,
    Tai,
    Yang,
}

pub const ALL_LIFE_STAGES: [LifeStage; 12] = [
    LifeStage::ChangSheng,
    LifeStage::MuYu,
    LifeStage::GuanDai,
    LifeStage::LinGuan,
    LifeStage::DiWang,
    LifeStage::Shuai,
    LifeStage::Bing,
    LifeStage::Si,
    LifeStage::Mu,
    LifeStage::Jue,
    LifeStage::Tai,
    LifeStage::Yang,
];

impl LifeStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChangSheng => "長生",
            Self::MuYu => "沐浴",
            Self::GuanDai => "冠帶",
            Self::LinGuan => "臨官",
            Self::DiWang => "帝旺",
            Self::Shuai => "衰",
            Self::Bing => "病",
            Self::Si => "死",
            Self::Mu => "墓",
            Self::Jue => "絕",
            Self::Tai => "胎",
            Self::Yang => "養",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Branch of 長生 for a bureau.
pub const fn chang_sheng_branch(bureau: Bureau) -> Branch {
    match bureau {
        Bureau::Water2 | Bureau::Earth5 => Branch::Shen,
        Bureau::Wood3 => Branch::Hai,
        Bureau::Metal4 => Branch::Si,
        Bureau::Fire6 => Branch::Yin,
    }
}

/// Life stage at every branch, indexed by branch.
pub fn life_stages(bureau: Bureau, direction: Direction) -> [LifeStage; 12] {
    let start = chang_sheng_branch(bureau);
    let mut out = [LifeStage::ChangSheng; 12];
    for (i, &stage) in ALL_LIFE_STAGES.iter().enumerate() {
        out[start.offset(i as i32 * direction.step()).index() as usize] = stage;
    }
    out
}
