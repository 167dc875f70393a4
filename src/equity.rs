//! County equity rankings: trees planted per 10,000 residents.
//!
//! Reads a small headed reference table (`county,trees_planted,population`)
//! and ranks counties from most to least trees per capita.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};
use tracing::{info, warn};

/// Scale for the per-capita metric.
pub const PER_CAPITA_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountyRow {
    pub county: String,
    pub trees_planted: f64,
    pub population: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyRank {
    pub rank: usize,
    pub county: String,
    pub trees_planted: f64,
    pub population: f64,
    pub trees_per_10k: f64,
}

pub fn load_counties(path: &Path) -> Result<Vec<CountyRow>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("opening county table {}", path.display()))?;
    let rows = read_counties(file).with_context(|| format!("reading {}", path.display()))?;
    info!(path = %path.display(), counties = rows.len(), "loaded county table");
    Ok(rows)
}

pub fn read_counties<R: Read>(reader: R) -> Result<Vec<CountyRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize::<CountyRow>() {
        rows.push(result.context("parsing county row")?);
    }
    Ok(rows)
}

/// Rank by trees per 10k people, highest first; ties by county name.
///
/// Counties with no positive population have no per-capita value and are left
/// out.
pub fn rank_counties(rows: &[CountyRow]) -> Vec<CountyRank> {
    let mut ranked: Vec<CountyRank> = rows
        .iter()
        .filter_map(|row| {
            if row.population > 0.0 {
                Some(CountyRank {
                    rank: 0,
                    county: row.county.clone(),
                    trees_planted: row.trees_planted,
                    population: row.population,
                    trees_per_10k: row.trees_planted / row.population * PER_CAPITA_SCALE,
                })
            } else {
                warn!(county = %row.county, population = row.population, "skipping county without population");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.trees_per_10k
            .total_cmp(&a.trees_per_10k)
            .then_with(|| a.county.cmp(&b.county))
    });
    for (i, r) in ranked.iter_mut().enumerate() {
        r.rank = i + 1;
    }
    ranked
}
