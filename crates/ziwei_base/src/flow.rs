//! Transient flow stars (流曜) for a selected decade, annual year or minor
//! limit.
//!
//! These are computed on demand from a resolved selection and never stored in
//! the chart.

use serde::Serialize;

use crate::ganzhi::Branch;
use crate::minor_star::{hongluan_branch, lucun_branch};
use crate::selection::ResolvedSelection;
use crate::star::SihuaLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowStar {
    pub name: &'static str,
    pub branch: Branch,
    /// Layer that produced the star; never [`SihuaLayer::Natal`].
    pub layer: SihuaLayer,
}

/// Flow stars for whatever the selection activates.
pub fn flow_stars(selection: &ResolvedSelection) -> Vec<FlowStar> {
    let mut out = Vec::new();
    if let Some(decade) = &selection.decade {
        let lu = lucun_branch(decade.stem);
        let layer = SihuaLayer::Decade;
        out.extend([
            FlowStar { name: "大祿", branch: lu, layer },
            FlowStar { name: "大羊", branch: lu.offset(1), layer },
            FlowStar { name: "大陀", branch: lu.offset(-1), layer },
        ]);
    }
    if let Some(annual) = &selection.annual {
        let lu = lucun_branch(annual.stem);
        let luan = hongluan_branch(annual.branch);
        let layer = SihuaLayer::Annual;
        out.extend([
            FlowStar { name: "年祿", branch: lu, layer },
            FlowStar { name: "年羊", branch: lu.offset(1), layer },
            FlowStar { name: "年陀", branch: lu.offset(-1), layer },
            FlowStar { name: "年鸞", branch: luan, layer },
            FlowStar { name: "年喜", branch: luan.offset(6), layer },
        ]);
    }
    if let Some(minor) = &selection.minor_limit {
        let lu = lucun_branch(minor.stem);
        let layer = SihuaLayer::MinorLimit;
        out.extend([
            FlowStar { name: "小祿", branch: lu, layer },
            FlowStar { name: "小羊", branch: lu.offset(1), layer },
            FlowStar { name: "小陀", branch: lu.offset(-1), layer },
        ]);
    }
    out
}
