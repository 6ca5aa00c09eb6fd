//! Sihua layering, selection resolution and flow stars on a built chart.

use ziwei_base::{
    BirthInput, Branch, Chart, ChartConfig, Gender, SelectionState, SihuaKind, SihuaLayer,
    SihuaTag, Selection, Stem, apply_sihua, apply_sihua_indices, build_chart,
};
use ziwei_calendar::{LunarDay, LunarTable};

/// Female, 1979-09-26 17:30: 命宮 子, 水二局, clockwise decades.
fn chart() -> Chart {
    let table = LunarTable::new()
        .with_day(
            1979,
            9,
            26,
            LunarDay {
                month: 8,
                day: 6,
                year_stem: 5,
                year_branch: 7,
            },
        )
        .unwrap();
    let input = BirthInput::new(1979, 9, 26, 17, 30, Gender::Female);
    build_chart(&input, &table, &ChartConfig::default()).unwrap()
}

fn tags(chart: &Chart, star: &str) -> Vec<SihuaTag> {
    chart
        .palaces
        .iter()
        .flat_map(|p| p.stars.iter())
        .find(|s| s.name == star)
        .map(|s| s.sihua.clone())
        .unwrap()
}

fn tag(kind: SihuaKind, layer: SihuaLayer) -> SihuaTag {
    SihuaTag { kind, layer }
}

#[test]
fn sihua_is_idempotent() {
    let mut once = chart();
    apply_sihua(&mut once, Some(Stem::Ding), Some(Stem::Geng));
    let mut twice = once.clone();
    apply_sihua(&mut twice, Some(Stem::Ding), Some(Stem::Geng));
    assert_eq!(once, twice);
}

#[test]
fn clearing_overlay_restores_natal() {
    let natal = chart();
    let mut c = natal.clone();
    apply_sihua(&mut c, Some(Stem::Jia), Some(Stem::Gui));
    assert_ne!(c, natal);
    apply_sihua(&mut c, None, None);
    assert_eq!(c, natal);
}

#[test]
fn layers_stack_in_order() {
    let mut c = chart();
    // Decade 丁: 天同 權. Annual 庚: 天同 科, 武曲 權.
    apply_sihua(&mut c, Some(Stem::Ding), Some(Stem::Geng));
    assert_eq!(
        tags(&c, "天同"),
        vec![
            tag(SihuaKind::Quan, SihuaLayer::Decade),
            tag(SihuaKind::Ke, SihuaLayer::Annual)
        ]
    );
    assert_eq!(
        tags(&c, "武曲"),
        vec![
            tag(SihuaKind::Lu, SihuaLayer::Natal),
            tag(SihuaKind::Quan, SihuaLayer::Annual)
        ]
    );
}

#[test]
fn only_main_stars_are_tagged() {
    let mut c = chart();
    // 丙 科 and 辛 忌 both name 文昌.
    apply_sihua(&mut c, Some(Stem::Bing), Some(Stem::Xin));
    for star in c.palaces.iter().flat_map(|p| p.stars.iter()) {
        if !star.is_main() {
            assert!(star.sihua.is_empty(), "{}", star.name);
        }
    }
}

#[test]
fn sentinel_indices() {
    let mut c = chart();
    apply_sihua_indices(&mut c, -1, -1).unwrap();
    assert_eq!(c, chart());
    assert!(apply_sihua_indices(&mut c, 10, -1).is_err());
    assert!(apply_sihua_indices(&mut c, -1, -3).is_err());
}

#[test]
fn selection_resolves_decade_and_annual() {
    let mut c = chart();
    let mut sel = Selection::natal();
    sel.select_decade(1).unwrap();
    sel.select_annual(0).unwrap();
    assert_eq!(sel.state(), SelectionState::NatalDecadeAnnual);

    let resolved = c.apply_selection(&sel);
    // Second decade: 丑, stem 丙 + 1 = 丁, ages 12-21 → 1991-2000.
    let decade = resolved.decade.unwrap();
    assert_eq!(decade.branch, Branch::Chou);
    assert_eq!(decade.stem, Stem::Ding);
    assert_eq!((decade.first_year, decade.last_year), (1991, 2000));
    // First year of that decade: 1979 + 12 = 1991 辛未.
    let annual = resolved.annual.unwrap();
    assert_eq!(annual.year, 1991);
    assert_eq!((annual.stem, annual.branch), (Stem::Xin, Branch::Wei));
    assert_eq!(annual.age, 12);
    // 未 year → 小限 starts at 丑; 虛歲 13, female counts back 12 → 丑.
    assert_eq!(annual.minor_limit, Branch::Chou);
    assert_eq!(resolved.minor_limit, None);

    // 丁 decade: 太陰 祿.
    assert_eq!(
        tags(&c, "太陰"),
        vec![tag(SihuaKind::Lu, SihuaLayer::Decade)]
    );

    // Deselecting the decade drops both overlay layers.
    sel.select_decade(1).unwrap();
    let resolved = c.apply_selection(&sel);
    assert!(resolved.decade.is_none() && resolved.annual.is_none());
    assert_eq!(c, chart());
}

#[test]
fn flow_stars_leave_chart_untouched() {
    let c = chart();
    let before = c.clone();
    let sel = Selection::from_indices(1, 0).unwrap();
    let flows = c.flow_stars(&sel);
    assert_eq!(c, before);
    let names: Vec<&str> = flows.iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        vec!["大祿", "大羊", "大陀", "年祿", "年羊", "年陀", "年鸞", "年喜"]
    );
    // 丁 decade → 大祿 午; 辛 year → 年祿 酉
    assert_eq!(flows[0].branch, Branch::Wu);
    assert_eq!(flows[3].branch, Branch::You);
}

#[test]
fn last_annual_of_a_decade_is_its_last_year() {
    let c = chart();
    for k in 0..12u8 {
        let decade = c.decade(k).unwrap();
        let annuals = decade.annuals(c.year_branch, false);
        assert_eq!(annuals[0].year, c.lunar_year + decade.age_start as i32);
        assert_eq!(annuals[9].year, decade.last_year);
        assert_eq!(annuals[9].age, decade.age_end);
    }
}

#[test]
fn minor_limit_layer_uses_its_palace_stem() {
    let mut c = chart();
    let sel = Selection::from_indices(1, 0).unwrap().with_minor_limit(true);
    let resolved = c.apply_selection(&sel);
    // 1991: 小限 丑, whose palace stem is 丁.
    let minor = resolved.minor_limit.unwrap();
    assert_eq!((minor.branch, minor.stem), (Branch::Chou, Stem::Ding));

    // 丁: 太陰 祿, 巨門 忌; 辛 year: 巨門 祿.
    assert_eq!(
        tags(&c, "太陰"),
        vec![
            tag(SihuaKind::Lu, SihuaLayer::Decade),
            tag(SihuaKind::Lu, SihuaLayer::MinorLimit)
        ]
    );
    assert_eq!(
        tags(&c, "巨門"),
        vec![
            tag(SihuaKind::Ji, SihuaLayer::Decade),
            tag(SihuaKind::Lu, SihuaLayer::Annual),
            tag(SihuaKind::Ji, SihuaLayer::MinorLimit)
        ]
    );

    let flows = c.flow_stars(&sel);
    let minor_flows: Vec<(&str, Branch)> = flows
        .iter()
        .filter(|f| f.layer == SihuaLayer::MinorLimit)
        .map(|f| (f.name, f.branch))
        .collect();
    assert_eq!(
        minor_flows,
        vec![("小祿", Branch::Wu), ("小羊", Branch::Wei), ("小陀", Branch::Si)]
    );

    // Switching the layer off drops its tags.
    let mut sel = sel;
    sel.toggle_minor_limit();
    assert_eq!(c.apply_selection(&sel).minor_limit, None);
    assert_eq!(
        tags(&c, "太陰"),
        vec![tag(SihuaKind::Lu, SihuaLayer::Decade)]
    );
}

#[test]
fn natal_selection_has_no_flow_stars() {
    assert!(chart().flow_stars(&Selection::natal()).is_empty());
}
