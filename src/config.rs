use clap::{Parser, ValueHint};
use std::{net::SocketAddr, path::PathBuf};

use crate::season::Season;

pub const DEFAULT_DATA_PATH: &str = "df_gps.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_TABLE_ROWS: usize = 1000;

/// Command-line settings for the dashboard server.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Kenya tree planting dashboard", long_about = None)]
pub struct DashboardArgs {
    /// Headerless planting file (8 positional columns)
    #[arg(long, default_value = DEFAULT_DATA_PATH, value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// County table with `county,trees_planted,population` for equity rankings
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub counties: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Maximum rows rendered in the filtered data table
    #[arg(long, default_value_t = DEFAULT_TABLE_ROWS)]
    pub table_rows: usize,
}

/// `value_parser` for `--season` flags.
pub fn parse_season(s: &str) -> Result<Season, String> {
    Season::from_str(s).ok_or_else(|| format!("unknown season `{s}` (expected all, rainy or dry)"))
}
