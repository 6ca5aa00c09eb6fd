//! Star catalog types and the Four Transformation (四化) tags.

use serde::{Deserialize, Serialize};

use crate::deity::DeityCycle;

/// Classification of a placed star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarCategory {
    /// One of the 14 main stars (甲級主星).
    Main,
    /// Auxiliary stars that drive most readings (六吉, 六煞, 祿存, 天馬).
    AuxiliaryImportant,
    /// Miscellaneous auxiliary stars (雜曜).
    AuxiliaryMinor,
    /// A name from one of the three 12-position deity cycles.
    Deity(DeityCycle),
}

/// The 14 main stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainStar {
    ZiWei,
    TianJi,
    TaiYang,
    WuQu,
    TianTong,
    LianZhen,
    TianFu,
    TaiYin,
    TanLang,
    JuMen,
    TianXiang,
    TianLiang,
    QiSha,
    PoJun,
}

/// All 14 main stars, Zi Wei group first, then Tian Fu group.
pub const ALL_MAIN_STARS: [MainStar; 14] = [
    MainStar::ZiWei,
    MainStar::TianJi,
    MainStar::TaiYang,
    MainStar::WuQu,
    MainStar::TianTong,
    MainStar::LianZhen,
    MainStar::TianFu,
    MainStar::TaiYin,
    MainStar::TanLang,
    MainStar::JuMen,
    MainStar::TianXiang,
    MainStar::TianLiang,
    MainStar::QiSha,
    MainStar::PoJun,
];

impl MainStar {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZiWei => "紫微",
            Self::TianJi => "天機",
            Self::TaiYang => "太陽",
            Self::WuQu => "武曲",
            Self::TianTong => "天同",
            Self::LianZhen => "廉貞",
            Self::TianFu => "天府",
            Self::TaiYin => "太陰",
            Self::TanLang => "貪狼",
            Self::JuMen => "巨門",
            Self::TianXiang => "天相",
            Self::TianLiang => "天梁",
            Self::QiSha => "七殺",
            Self::PoJun => "破軍",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_MAIN_STARS.iter().copied().find(|s| s.name() == name)
    }
}

/// The six malefic auxiliaries (六煞).
pub const MALEFIC_STARS: [&str; 6] = ["擎羊", "陀羅", "火星", "鈴星", "地空", "地劫"];

/// The four transformations, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SihuaKind {
    /// 化祿
    Lu,
    /// 化權
    Quan,
    /// 化科
    Ke,
    /// 化忌
    Ji,
}

/// Transformations in [祿, 權, 科, 忌] order; position matches the sihua table column.
pub const ALL_SIHUA_KINDS: [SihuaKind; 4] =
    [SihuaKind::Lu, SihuaKind::Quan, SihuaKind::Ke, SihuaKind::Ji];

impl SihuaKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lu => "祿",
            Self::Quan => "權",
            Self::Ke => "科",
            Self::Ji => "忌",
        }
    }
}

/// Which stem imprinted a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SihuaLayer {
    /// Birth-year stem (本命).
    Natal,
    /// Selected decade palace stem (大限).
    Decade,
    /// Selected annual stem (流年).
    Annual,
    /// Stem of the minor-limit palace in the selected year (小限).
    MinorLimit,
}

impl SihuaLayer {
    /// Single-character layer label used on rendered charts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Natal => "本",
            Self::Decade => "大",
            Self::Annual => "流",
            Self::MinorLimit => "小",
        }
    }
}

/// One transformation applied to a main star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SihuaTag {
    pub kind: SihuaKind,
    pub layer: SihuaLayer,
}

/// A star placed in a palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Star {
    pub name: &'static str,
    pub category: StarCategory,
    /// Transformations; only ever non-empty for [`StarCategory::Main`].
    pub sihua: Vec<SihuaTag>,
}

impl Star {
    pub fn new(name: &'static str, category: StarCategory) -> Self {
        Self {
            name,
            category,
            sihua: Vec::new(),
        }
    }

    pub fn is_main(&self) -> bool {
        self.category == StarCategory::Main
    }

    pub fn is_deity(&self) -> bool {
        matches!(self.category, StarCategory::Deity(_))
    }

    /// Whether this is one of the six malefic auxiliaries.
    pub fn is_malefic(&self) -> bool {
        MALEFIC_STARS.contains(&self.name)
    }
}
