use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use kenyatrees::config::{parse_season, DEFAULT_DATA_PATH};
use kenyatrees::load::load_records;
use kenyatrees::render::thousands;
use kenyatrees::season::Season;
use kenyatrees::summary::{month_name, monthly_trend, summarize};

/// Print the dashboard metrics for a planting file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a Kenya tree planting file", long_about = None)]
struct Args {
    /// Headerless planting file
    #[arg(default_value = DEFAULT_DATA_PATH, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// all, rainy or dry
    #[arg(long, default_value = "all", value_parser = parse_season)]
    season: Season,

    /// Also print the per-month breakdown
    #[arg(long)]
    monthly: bool,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr) // Log to stderr
        .init();

    let args = Args::parse();
    let ds = load_records(&args.input)?;
    let retained = args.season.filter(&ds.records);
    let summary = summarize(args.season, &retained);

    println!("Season:          {}", summary.season);
    println!("Total Trees:     {}", thousands(summary.total_trees));
    println!("Records:         {}", summary.records);
    println!("Rainy Season %:  {:.1}%", summary.rainy_pct);
    println!(
        "Skipped lines:   {} malformed, {} without coordinates, {} outside Kenya",
        ds.stats.malformed, ds.stats.missing_coords, ds.stats.out_of_bounds
    );

    if args.monthly {
        let trend = monthly_trend(&retained);
        println!();
        println!("{:<6}{:<7}{:>10}{:>12}", "Month", "Season", "Records", "Seedlings");
        for b in &trend.months {
            println!(
                "{:<6}{:<7}{:>10}{:>12}",
                month_name(b.month),
                if b.rainy { "Rainy" } else { "Dry" },
                b.records,
                thousands(b.seedlings)
            );
        }
        if trend.undated > 0 {
            println!("({} records without a date)", trend.undated);
        }
    }
    Ok(())
}
