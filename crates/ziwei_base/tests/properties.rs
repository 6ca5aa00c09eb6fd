//! Structural properties that must hold for every chart.

use ziwei_base::{
    ALL_BRANCHES, ALL_STEMS, BirthInput, Branch, ChartConfig, ChartError, Direction, Gender,
    LeapMonthPolicy, PalaceName, Stem, StarCategory, annual_stem_branch, build_chart,
};
use ziwei_calendar::{CalendarError, GregorianDateTime, LunarAdapter, LunarDate};

/// Adapter that returns the same lunar facts for any instant.
struct Fixed(LunarDate);

impl LunarAdapter for Fixed {
    fn convert(&self, instant: &GregorianDateTime) -> Result<LunarDate, CalendarError> {
        instant.validate()?;
        Ok(self.0)
    }
}

/// Lunar facts for `year` with its own stem/branch.
fn facts(year: i32, month: i8, day: u8, time_branch: u8) -> LunarDate {
    let (stem, branch) = annual_stem_branch(year);
    LunarDate {
        month,
        day,
        year_stem: stem.index(),
        year_branch: branch.index(),
        time_branch,
    }
}

#[test]
fn names_are_a_bijection_for_every_month_and_hour() {
    for month in 1..=12i8 {
        for tb in 0..12u8 {
            let adapter = Fixed(facts(2000, month, 1, tb));
            let input = BirthInput::new(2000, 6, 1, 12, 0, Gender::Male);
            let c = build_chart(&input, &adapter, &ChartConfig::default()).unwrap();
            let mut seen: Vec<PalaceName> = c.palaces.iter().map(|p| p.name).collect();
            seen.sort_by_key(|n| n.index());
            seen.dedup();
            assert_eq!(seen.len(), 12, "month {month} branch {tb}");
            assert_eq!(c.natal_palace().name, PalaceName::Ming);
        }
    }
}

#[test]
fn fourteen_main_stars_each_once() {
    for day in 1..=30u8 {
        let adapter = Fixed(facts(1990, 3, day, 4));
        let input = BirthInput::new(1990, 6, 1, 8, 0, Gender::Female);
        let c = build_chart(&input, &adapter, &ChartConfig::default()).unwrap();
        let mains: usize = c.palaces.iter().map(|p| p.main_stars().count()).sum();
        assert_eq!(mains, 14);
        let zw = c.find_star("紫微").unwrap();
        let tf = c.find_star("天府").unwrap();
        assert_eq!((zw.index() + tf.index()) % 12, 4);
    }
}

#[test]
fn direction_and_windows_for_all_stems_and_genders() {
    // 1984..1993 covers 甲..癸.
    for (offset, stem) in ALL_STEMS.iter().enumerate() {
        let year = 1984 + offset as i32;
        for gender in [Gender::Male, Gender::Female] {
            let adapter = Fixed(facts(year, 5, 10, 3));
            let input = BirthInput::new(year, 7, 1, 6, 0, gender);
            let c = build_chart(&input, &adapter, &ChartConfig::default()).unwrap();
            assert_eq!(c.year_stem, *stem);
            let expected = if stem.is_yang() == gender.is_male() {
                Direction::Forward
            } else {
                Direction::Backward
            };
            assert_eq!(c.direction, expected, "{} {gender}", stem.name());

            let mut windows: Vec<(u32, u32)> =
                c.palaces.iter().map(|p| (p.age_start, p.age_end)).collect();
            windows.sort_unstable();
            let b = c.bureau.number() as u32;
            for (i, (start, end)) in windows.into_iter().enumerate() {
                assert_eq!(start, b + 10 * i as u32);
                assert_eq!(end, start + 9);
            }
            // The natal palace always opens the first decade.
            assert_eq!(c.natal_palace().age_start, b);
        }
    }
}

#[test]
fn deity_cycles_fill_every_palace() {
    let adapter = Fixed(facts(2001, 9, 21, 7));
    let input = BirthInput::new(2001, 10, 7, 14, 0, Gender::Male);
    let c = build_chart(&input, &adapter, &ChartConfig::default()).unwrap();
    for branch in ALL_BRANCHES {
        let deities = c
            .palace(branch)
            .stars
            .iter()
            .filter(|s| matches!(s.category, StarCategory::Deity(_)))
            .count();
        assert_eq!(deities, 3);
    }
    // 歲建 sits on the year branch (巳 for 2001).
    assert_eq!(c.find_star("歲建"), Some(Branch::Si));
}

#[test]
fn leap_month_policies() {
    // Leap 4th month, day 20: same as month 4, or month 5 when split.
    let adapter = Fixed(facts(2020, -4, 20, 0));
    let input = BirthInput::new(2020, 6, 11, 0, 30, Gender::Female);

    let plain = build_chart(&input, &adapter, &ChartConfig::default()).unwrap();
    assert!(plain.lunar.is_leap);
    assert_eq!(plain.lunar.month, 4);
    // 命宮 = 寅 + 3 − 0 = 巳
    assert_eq!(plain.natal, Branch::Si);

    let cfg = ChartConfig {
        leap_month: LeapMonthPolicy::SplitAtMidMonth,
        ..ChartConfig::default()
    };
    let split = build_chart(&input, &adapter, &cfg).unwrap();
    assert_eq!(split.lunar.month, 5);
    assert_eq!(split.natal, Branch::Wu);
}

#[test]
fn out_of_range_lunar_facts_are_rejected() {
    let input = BirthInput::new(2000, 1, 1, 0, 0, Gender::Male);
    let cfg = ChartConfig::default();

    let bad_day = Fixed(facts(2000, 1, 31, 0));
    assert!(matches!(
        build_chart(&input, &bad_day, &cfg),
        Err(ChartError::InvalidLunarDate(_))
    ));

    let bad_branch = Fixed(LunarDate {
        time_branch: 12,
        ..facts(2000, 1, 1, 0)
    });
    assert!(matches!(
        build_chart(&input, &bad_branch, &cfg),
        Err(ChartError::InvalidLunarDate(_))
    ));
}

#[test]
fn year_pillar_must_match_birth_year() {
    // 甲子 is neither 2000 (庚辰) nor 1999 (己卯).
    let adapter = Fixed(LunarDate {
        month: 1,
        day: 1,
        year_stem: Stem::Jia.index(),
        year_branch: Branch::Zi.index(),
        time_branch: 0,
    });
    let input = BirthInput::new(2000, 1, 1, 0, 0, Gender::Male);
    assert!(matches!(
        build_chart(&input, &adapter, &ChartConfig::default()),
        Err(ChartError::InvalidLunarDate(_))
    ));
}

#[test]
fn chart_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<ziwei_base::Chart>();
}
