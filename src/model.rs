use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::season;

/// One planting event, after coercion.
///
/// Every field that can fail to parse is an `Option`; the loader only ever
/// drops a row for missing or out-of-range coordinates, so `latitude` and
/// `longitude` are plain floats here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantingRecord {
    /// Raw GPS text from the source, carried through untouched.
    pub gps_raw: String,
    pub planting_date: Option<NaiveDate>,
    pub seedlings_planted: Option<u64>,
    /// Source "month-year" label, carried through untouched.
    pub month_year: String,
    pub latitude: f64,
    pub longitude: f64,
    /// °C, display only.
    pub temperature: Option<f64>,
    /// mm, display only.
    pub rainfall: Option<f64>,
}

impl PlantingRecord {
    /// Calendar month (1..=12) of the planting date.
    pub fn month(&self) -> Option<u32> {
        self.planting_date.map(|d| d.month())
    }

    /// False when the date is absent.
    pub fn is_rainy_season(&self) -> bool {
        self.month().is_some_and(season::is_rainy_month)
    }

    /// Seedlings as they count towards totals: absent contributes nothing.
    pub fn seedlings_or_zero(&self) -> u64 {
        self.seedlings_planted.unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) fn record(date: Option<&str>, seedlings: Option<u64>, lat: f64, lon: f64) -> PlantingRecord {
    PlantingRecord {
        gps_raw: format!("{lat},{lon}"),
        planting_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        seedlings_planted: seedlings,
        month_year: String::new(),
        latitude: lat,
        longitude: lon,
        temperature: Some(22.0),
        rainfall: Some(80.0),
    }
}
