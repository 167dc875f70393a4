// src/load/mod.rs

pub mod bounds;
pub mod cache;
pub mod coerce;
pub mod columns;

pub use bounds::{BoundingBox, KENYA};
pub use cache::LoadCache;

use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use std::{borrow::Cow, fs::File, io::Read, path::Path};
use tracing::{debug, info};

use crate::model::PlantingRecord;
use columns::*;

/// Counters for one pass over a source file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub malformed: usize,
    pub missing_coords: usize,
    pub out_of_bounds: usize,
    pub kept: usize,
}

/// The normalized table for one source path.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<PlantingRecord>,
    pub stats: LoadStats,
}

/// Why a well-formed row did not make it into the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingCoords,
    OutOfBounds,
}

/// Load a headerless, positional planting file and keep the rows that land in Kenya.
pub fn load_records(path: &Path) -> Result<Dataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let dataset =
        load_from_reader(file, &KENYA).with_context(|| format!("reading {}", path.display()))?;
    info!(
        path = %path.display(),
        lines = dataset.stats.lines,
        malformed = dataset.stats.malformed,
        missing_coords = dataset.stats.missing_coords,
        out_of_bounds = dataset.stats.out_of_bounds,
        kept = dataset.stats.kept,
        "loaded planting records"
    );
    Ok(dataset)
}

/// Same as [`load_records`] over any reader, with an explicit bounding box.
pub fn load_from_reader<R: Read>(reader: R, bbox: &BoundingBox) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut dataset = Dataset::default();
    let mut raw = ByteRecord::new();
    while rdr.read_byte_record(&mut raw).context("reading csv record")? {
        dataset.stats.lines += 1;
        if raw.len() != FIELD_COUNT {
            dataset.stats.malformed += 1;
            debug!(
                line = raw.position().map(|p| p.line()),
                fields = raw.len(),
                "skipping malformed line"
            );
            continue;
        }

        match normalize_row(&raw, bbox) {
            Ok(record) => dataset.records.push(record),
            Err(Rejection::MissingCoords) => dataset.stats.missing_coords += 1,
            Err(Rejection::OutOfBounds) => dataset.stats.out_of_bounds += 1,
        }
    }
    dataset.stats.kept = dataset.records.len();
    Ok(dataset)
}

fn field(raw: &ByteRecord, i: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(&raw[i])
}

fn normalize_row(raw: &ByteRecord, bbox: &BoundingBox) -> Result<PlantingRecord, Rejection> {
    let (lat, lon) = match (
        coerce::parse_float(&field(raw, LAT)),
        coerce::parse_float(&field(raw, LON)),
    ) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(Rejection::MissingCoords),
    };
    if !bbox.contains(lat, lon) {
        return Err(Rejection::OutOfBounds);
    }

    Ok(PlantingRecord {
        gps_raw: field(raw, GPS_STR).into_owned(),
        planting_date: coerce::parse_date(&field(raw, PLANTING_DATE)),
        seedlings_planted: coerce::parse_count(&field(raw, SEEDLINGS)),
        month_year: field(raw, MONTH_YEAR).into_owned(),
        latitude: lat,
        longitude: lon,
        temperature: coerce::parse_float(&field(raw, TEMPERATURE)),
        rainfall: coerce::parse_float(&field(raw, RAINFALL)),
    })
}
