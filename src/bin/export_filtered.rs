use anyhow::Result;
use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use kenyatrees::config::{parse_season, DEFAULT_DATA_PATH};
use kenyatrees::load::load_records;
use kenyatrees::season::Season;
use kenyatrees::table::{self, EXPORT_FILE_NAME};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Parquet,
}

/// Write the season-filtered planting table to disk.
#[derive(Parser, Debug)]
#[command(author, version, about = "Export filtered Kenya tree planting records", long_about = None)]
struct Args {
    /// Headerless planting file
    #[arg(default_value = DEFAULT_DATA_PATH, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// all, rainy or dry
    #[arg(long, default_value = "all", value_parser = parse_season)]
    season: Season,

    /// Output path (defaults to filtered_tree_planting.csv / .parquet)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let ds = load_records(&args.input)?;
    let retained = args.season.filter(&ds.records);
    info!(
        season = args.season.as_str(),
        retained = retained.len(),
        "filtered records"
    );

    match args.format {
        Format::Csv => {
            let out = args
                .output
                .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            table::write_csv(&retained, &out)
        }
        Format::Parquet => {
            let out = args
                .output
                .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME).with_extension("parquet"));
            table::write_parquet(&retained, &out)
        }
    }
}
