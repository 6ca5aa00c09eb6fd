//! Four Transformations (四化) overlay.
//!
//! A stem transforms four stars into 祿, 權, 科 and 忌. Up to four stems can
//! be in play at once: the birth-year stem, the selected decade's palace
//! stem, the selected annual stem and the stem of that year's minor-limit
//! palace. Only main stars carry tags; table entries naming auxiliaries
//! (文昌, 文曲, 左輔, 右弼) leave the chart unchanged.

use tracing::trace;

use crate::chart::Chart;
use crate::error::ValidationError;
use crate::ganzhi::{Stem, stem_from_sentinel};
use crate::palace::Palace;
use crate::star::{ALL_SIHUA_KINDS, SihuaKind, SihuaLayer, SihuaTag};

/// Transformed star names by stem, columns [祿, 權, 科, 忌].
pub const SIHUA_TABLE: [[&str; 4]; 10] = [
    ["廉貞", "破軍", "武曲", "太陽"],
    ["天機", "天梁", "紫微", "太陰"],
    ["天同", "天機", "文昌", "廉貞"],
    ["太陰", "天同", "天機", "巨門"],
    ["貪狼", "太陰", "右弼", "天機"],
    ["武曲", "貪狼", "天梁", "文曲"],
    ["太陽", "武曲", "天同", "天相"],
    ["巨門", "太陽", "文曲", "文昌"],
    ["天梁", "紫微", "左輔", "武曲"],
    ["破軍", "巨門", "太陰", "貪狼"],
];

/// Star that `stem` transforms into `kind`.
pub const fn sihua_star(stem: Stem, kind: SihuaKind) -> &'static str {
    SIHUA_TABLE[stem.index() as usize][kind as usize]
}

/// Remove every tag from every main star.
pub fn clear_sihua(palaces: &mut [Palace]) {
    for star in palaces.iter_mut().flat_map(|p| p.stars.iter_mut()) {
        star.sihua.clear();
    }
}

fn imprint(palaces: &mut [Palace], stem: Stem, layer: SihuaLayer) {
    for kind in ALL_SIHUA_KINDS {
        let target = sihua_star(stem, kind);
        for star in palaces
            .iter_mut()
            .flat_map(|p| p.stars.iter_mut())
            .filter(|s| s.is_main() && s.name == target)
        {
            trace!(star = target, kind = kind.name(), layer = layer.name(), "sihua");
            star.sihua.push(SihuaTag { kind, layer });
        }
    }
}

/// Reset and reapply all transformation layers.
///
/// The natal layer always comes from the chart's year stem; the decade and
/// annual layers are applied when given, in that order. Calling this twice
/// with the same arguments leaves the chart unchanged.
pub fn apply_sihua(chart: &mut Chart, decade_stem: Option<Stem>, annual_stem: Option<Stem>) {
    apply_sihua_layers(chart, decade_stem, annual_stem, None);
}

/// [`apply_sihua`] plus the minor-limit layer, applied last.
pub fn apply_sihua_layers(
    chart: &mut Chart,
    decade_stem: Option<Stem>,
    annual_stem: Option<Stem>,
    minor_limit_stem: Option<Stem>,
) {
    clear_sihua(&mut chart.palaces);
    let layers = [
        (SihuaLayer::Natal, Some(chart.year_stem)),
        (SihuaLayer::Decade, decade_stem),
        (SihuaLayer::Annual, annual_stem),
        (SihuaLayer::MinorLimit, minor_limit_stem),
    ];
    for (layer, stem) in layers {
        if let Some(stem) = stem {
            imprint(&mut chart.palaces, stem, layer);
        }
    }
}

/// [`apply_sihua`] with stems given as indices, `-1` meaning none.
pub fn apply_sihua_indices(
    chart: &mut Chart,
    decade_stem: i32,
    annual_stem: i32,
) -> Result<(), ValidationError> {
    let decade = stem_from_sentinel(decade_stem)?;
    let annual = stem_from_sentinel(annual_stem)?;
    apply_sihua(chart, decade, annual);
    Ok(())
}
