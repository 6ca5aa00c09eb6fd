//! Zi Wei Dou Shu (紫微斗數) natal chart engine.
//!
//! This crate provides:
//! - Palace layout, Five-Element bureau and palace stems
//! - Placement of the 14 main stars, auxiliary stars and deity cycles
//! - Life stages, decade cycle, decade years and minor limits
//! - The three-layer Four Transformations overlay and flow stars
//!
//! Lunar facts arrive through [`ziwei_calendar::LunarAdapter`]; everything
//! else is table lookups and modulo-12 arithmetic on [`Branch`].

pub mod bureau;
pub mod chart;
pub mod config;
pub mod decade;
pub mod deity;
pub mod error;
pub mod flow;
pub mod ganzhi;
pub mod life_stage;
pub mod main_star;
pub mod minor_star;
pub mod palace;
pub mod selection;
pub mod sihua;
pub mod star;
pub mod summary;

pub use bureau::{ALL_BUREAUS, BUREAU_TABLE, Bureau, bureau_for};
pub use chart::{BirthInput, Chart, Gender, LunarFacts, build_chart};
pub use config::{ChartConfig, KuiYueRule, LeapMonthPolicy, TianMaBasis};
pub use decade::{
    AnnualPeriod, DecadePeriod, Direction, MinorLimit, decade_direction, minor_limit_branch,
    nominal_age_in, year_at_age,
};
pub use deity::DeityCycle;
pub use error::{ChartError, ValidationError};
pub use flow::{FlowStar, flow_stars};
pub use ganzhi::{
    ALL_BRANCHES, ALL_STEMS, Branch, Stem, annual_stem_branch, parse_ganzhi, stem_from_sentinel,
};
pub use life_stage::LifeStage;
pub use main_star::{tianfu_branch, ziwei_branch};
pub use palace::{Palace, PalaceName, relative_palace_name};
pub use selection::{ResolvedSelection, Selection, SelectionState};
pub use sihua::{SIHUA_TABLE, apply_sihua, apply_sihua_indices, apply_sihua_layers};
pub use star::{MainStar, SihuaKind, SihuaLayer, SihuaTag, Star, StarCategory};
pub use summary::ChartSummary;
