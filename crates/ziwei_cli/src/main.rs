use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use ziwei_base::{
    BirthInput, Chart, ChartConfig, ChartSummary, FlowStar, Gender, KuiYueRule, LeapMonthPolicy,
    ResolvedSelection, Selection, TianMaBasis, annual_stem_branch, bureau_for, build_chart,
    parse_ganzhi, relative_palace_name,
};
use ziwei_calendar::{LunarDay, LunarTable};

#[derive(Parser)]
#[command(name = "ziwei", about = "Zi Wei Dou Shu chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full natal chart with optional decade/annual overlay
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Decade ordinal 0-11 in age order (-1 = none)
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        decade: i32,
        /// Annual offset 0-9 within the decade (-1 = none)
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        annual: i32,
        /// Overlay the selected year's minor limit (小限)
        #[arg(long)]
        minor_limit: bool,
        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
    },
    /// One-line JSON summary record
    Summary {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Stem and branch of a Gregorian year
    Ganzhi {
        /// Gregorian year
        #[arg(allow_hyphen_values = true)]
        year: i32,
    },
    /// Five-Element bureau of a palace stem/branch, e.g. 丙子
    Bureau {
        /// Two-character 干支 label
        pair: String,
    },
}

#[derive(Args)]
struct BirthArgs {
    /// Gregorian birth date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Local clock time (hh:mm)
    #[arg(long)]
    time: String,
    /// Gender: 男/女, male/female, m/f
    #[arg(long)]
    gender: String,
    /// Lunar month 1-12
    #[arg(long)]
    lunar_month: u8,
    /// Lunar day 1-30
    #[arg(long)]
    lunar_day: u8,
    /// The lunar month is a leap (閏) month
    #[arg(long)]
    leap: bool,
    /// Lunar year 干支, e.g. 己未
    #[arg(long)]
    year_ganzhi: String,
    /// Leap month folding
    #[arg(long, value_enum, default_value = "preceding")]
    leap_policy: LeapPolicyArg,
    /// 天魁/天鉞 placement for 辛 years
    #[arg(long, value_enum, default_value = "tiger-horse")]
    kui_yue: KuiYueArg,
    /// Branch that selects 天馬
    #[arg(long, value_enum, default_value = "month")]
    tian_ma: TianMaArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LeapPolicyArg {
    Preceding,
    Split,
}

#[derive(Clone, Copy, ValueEnum)]
enum KuiYueArg {
    TigerHorse,
    HorseTiger,
}

#[derive(Clone, Copy, ValueEnum)]
enum TianMaArg {
    Month,
    Year,
}

impl BirthArgs {
    fn config(&self) -> ChartConfig {
        ChartConfig {
            leap_month: match self.leap_policy {
                LeapPolicyArg::Preceding => LeapMonthPolicy::AsPrecedingMonth,
                LeapPolicyArg::Split => LeapMonthPolicy::SplitAtMidMonth,
            },
            kui_yue: match self.kui_yue {
                KuiYueArg::TigerHorse => KuiYueRule::XinTigerHorse,
                KuiYueArg::HorseTiger => KuiYueRule::XinHorseTiger,
            },
            tian_ma: match self.tian_ma {
                TianMaArg::Month => TianMaBasis::MonthBranch,
                TianMaArg::Year => TianMaBasis::YearBranch,
            },
        }
    }

    /// Birth input plus a one-day lunar table answering for it.
    fn resolve(&self) -> Result<(BirthInput, LunarTable), String> {
        let (year, month, day) = parse_date(&self.date)?;
        let (hour, minute) = parse_time(&self.time)?;
        let gender: Gender = self.gender.parse().map_err(|e| format!("{e}"))?;
        let (stem, branch) = parse_ganzhi(&self.year_ganzhi)
            .ok_or_else(|| format!("invalid year 干支: {}", self.year_ganzhi))?;
        let lunar_month = i8::try_from(self.lunar_month)
            .map_err(|_| format!("lunar month out of range: {}", self.lunar_month))?;
        let lunar = LunarDay {
            month: if self.leap { -lunar_month } else { lunar_month },
            day: self.lunar_day,
            year_stem: stem.index(),
            year_branch: branch.index(),
        };
        let table = LunarTable::new()
            .with_day(year, month, day, lunar)
            .map_err(|e| format!("{e}"))?;
        Ok((
            BirthInput::new(year, month, day, hour, minute, gender),
            table,
        ))
    }

    fn build(&self) -> Result<Chart, String> {
        let (input, table) = self.resolve()?;
        build_chart(&input, &table, &self.config()).map_err(|e| format!("{e}"))
    }
}

fn parse_date(s: &str) -> Result<(i32, u32, u32), String> {
    // A leading '-' belongs to the year.
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let parts: Vec<&str> = rest.split('-').collect();
    if parts.len() != 3 {
        return Err(format!("expected YYYY-MM-DD, got {s}"));
    }
    let year: i32 = parts[0].parse().map_err(|e| format!("{e}"))?;
    let month: u32 = parts[1].parse().map_err(|e| format!("{e}"))?;
    let day: u32 = parts[2].parse().map_err(|e| format!("{e}"))?;
    Ok((sign * year, month, day))
}

fn parse_time(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("expected hh:mm, got {s}"));
    }
    let hour: u32 = parts[0].parse().map_err(|e| format!("{e}"))?;
    let minute: u32 = parts[1].parse().map_err(|e| format!("{e}"))?;
    Ok((hour, minute))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    // A subscriber may already be installed when embedded; that is fine.
    let _ = Registry::default().with(layer).with(filter).try_init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn star_label(star: &ziwei_base::Star) -> String {
    let tags: String = star
        .sihua
        .iter()
        .map(|t| format!("{}{}", t.layer.name(), t.kind.name()))
        .collect();
    if tags.is_empty() {
        star.name.to_string()
    } else {
        format!("{}({tags})", star.name)
    }
}

fn print_chart(chart: &Chart, resolved: &ResolvedSelection, flows: &[FlowStar]) {
    let input = &chart.input;
    println!(
        "{}-{:02}-{:02} {:02}:{:02} {}  {}{}年  農曆{}{}月{}日 {}時",
        input.year,
        input.month,
        input.day,
        input.hour,
        input.minute,
        input.gender,
        chart.year_stem.name(),
        chart.year_branch.name(),
        if chart.lunar.is_leap { "閏" } else { "" },
        chart.lunar.month,
        chart.lunar.day,
        chart.lunar.time_branch.name(),
    );
    println!(
        "{}  命宮 {}  身宮 {}  {}  命主 {}  身主 {}",
        chart.bureau.name(),
        chart.natal.name(),
        chart.body.name(),
        chart.direction.name(),
        chart.ming_zhu,
        chart.shen_zhu,
    );
    if let Some(d) = &resolved.decade {
        println!(
            "大限 {}{} {}-{} ({}-{})",
            d.stem.name(),
            d.branch.name(),
            d.age_start,
            d.age_end,
            d.first_year,
            d.last_year
        );
    }
    if let Some(a) = &resolved.annual {
        println!(
            "流年 {} {}{} {}歲 小限 {}",
            a.year,
            a.stem.name(),
            a.branch.name(),
            a.age,
            a.minor_limit.name()
        );
    }
    if let Some(m) = &resolved.minor_limit {
        println!("小限四化 {}{}", m.stem.name(), m.branch.name());
    }
    println!();

    for step in 0..12 {
        let palace = chart.palace(chart.natal.offset(-step));
        let mut overlay = String::new();
        if let Some(d) = &resolved.decade {
            overlay.push_str(" 大");
            overlay.push_str(relative_palace_name(d.branch, palace.branch).short_name());
        }
        if let Some(a) = &resolved.annual {
            overlay.push_str(" 流");
            overlay.push_str(relative_palace_name(a.branch, palace.branch).short_name());
        }
        println!(
            "{}{} {}{} {:>3}-{:<3} {}{}",
            palace.stem.name(),
            palace.branch.name(),
            palace.name.name(),
            if palace.is_body { "(身)" } else { "" },
            palace.age_start,
            palace.age_end,
            palace.life_stage.name(),
            overlay,
        );
        if palace.is_empty_of_main() {
            println!("    (空宮)");
        }
        for category in [
            ziwei_base::StarCategory::Main,
            ziwei_base::StarCategory::AuxiliaryImportant,
            ziwei_base::StarCategory::AuxiliaryMinor,
        ] {
            let names: Vec<String> = palace.stars_of(category).map(star_label).collect();
            if !names.is_empty() {
                println!("    {}", names.join(" "));
            }
        }
        let deities: Vec<&str> = palace
            .stars
            .iter()
            .filter(|s| s.is_deity())
            .map(|s| s.name)
            .collect();
        let here: Vec<&str> = flows
            .iter()
            .filter(|f| f.branch == palace.branch)
            .map(|f| f.name)
            .collect();
        println!("    {}", deities.join(" "));
        if !here.is_empty() {
            println!("    {}", here.join(" "));
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            birth,
            decade,
            annual,
            minor_limit,
            json,
        } => {
            let mut chart = birth.build().unwrap_or_else(|e| fail(e));
            let selection = Selection::from_indices(decade, annual)
                .unwrap_or_else(|e| fail(e))
                .with_minor_limit(minor_limit);
            let resolved = chart.apply_selection(&selection);
            let flows = chart.flow_stars(&selection);
            if json {
                let value = serde_json::json!({
                    "chart": chart,
                    "selection": resolved,
                    "flow_stars": flows,
                });
                match serde_json::to_string_pretty(&value) {
                    Ok(s) => println!("{s}"),
                    Err(e) => fail(e),
                }
            } else {
                print_chart(&chart, &resolved, &flows);
            }
        }

        Commands::Summary { birth } => {
            let chart = birth.build().unwrap_or_else(|e| fail(e));
            match serde_json::to_string(&ChartSummary::from_chart(&chart)) {
                Ok(s) => println!("{s}"),
                Err(e) => fail(e),
            }
        }

        Commands::Ganzhi { year } => {
            let (stem, branch) = annual_stem_branch(year);
            println!(
                "{year}: {}{} ({} {})",
                stem.name(),
                branch.name(),
                stem.pinyin(),
                branch.pinyin()
            );
        }

        Commands::Bureau { pair } => {
            let (stem, branch) =
                parse_ganzhi(&pair).unwrap_or_else(|| fail(format!("invalid 干支: {pair}")));
            let bureau = bureau_for(stem, branch);
            println!("{pair}: {} ({})", bureau.name(), bureau.number());
        }
    }
}
