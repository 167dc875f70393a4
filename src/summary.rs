use serde::Serialize;

use crate::model::PlantingRecord;
use crate::season::{self, Season};

/// Headline metrics for the retained set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub season: &'static str,
    /// Sum of seedlings, saturating at `u64::MAX`; records without a count contribute 0.
    pub total_trees: u64,
    pub records: usize,
    /// One decimal place, 0 for an empty set.
    pub rainy_pct: f64,
}

pub fn summarize(season: Season, retained: &[&PlantingRecord]) -> Summary {
    let total_trees = retained
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.seedlings_or_zero()));
    let rainy = retained.iter().filter(|r| r.is_rainy_season()).count();
    let rainy_pct = if retained.is_empty() {
        0.0
    } else {
        round1(100.0 * rainy as f64 / retained.len() as f64)
    };
    Summary {
        season: season.label(),
        total_trees,
        records: retained.len(),
        rainy_pct,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Mean coordinate of the retained set, used to centre the map.
pub fn map_center(retained: &[&PlantingRecord]) -> Option<(f64, f64)> {
    if retained.is_empty() {
        return None;
    }
    let n = retained.len() as f64;
    let lat = retained.iter().map(|r| r.latitude).sum::<f64>() / n;
    let lon = retained.iter().map(|r| r.longitude).sum::<f64>() / n;
    Some((lat, lon))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    pub rainy: bool,
    pub records: usize,
    pub seedlings: u64,
}

/// Group-by-month view for the seasonal trends page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// Always twelve buckets, January first.
    pub months: Vec<MonthBucket>,
    pub undated: usize,
}

impl MonthlyTrend {
    /// Month with the most seedlings planted; ties go to the earlier month.
    pub fn peak_month(&self) -> Option<&MonthBucket> {
        self.months
            .iter()
            .filter(|b| b.records > 0)
            .fold(None, |best: Option<&MonthBucket>, b| match best {
                Some(cur) if cur.seedlings >= b.seedlings => Some(cur),
                _ => Some(b),
            })
    }
}

pub fn monthly_trend(retained: &[&PlantingRecord]) -> MonthlyTrend {
    let mut months: Vec<MonthBucket> = (1..=12)
        .map(|month| MonthBucket {
            month,
            rainy: season::is_rainy_month(month),
            records: 0,
            seedlings: 0,
        })
        .collect();
    let mut undated = 0;
    for r in retained {
        match r.month() {
            Some(m) => {
                let bucket = &mut months[(m - 1) as usize];
                bucket.records += 1;
                bucket.seedlings = bucket.seedlings.saturating_add(r.seedlings_or_zero());
            }
            None => undated += 1,
        }
    }
    MonthlyTrend { months, undated }
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    fn sample() -> Vec<PlantingRecord> {
        vec![
            record(Some("2023-04-10"), Some(100), 1.0, 38.0),
            record(Some("2023-07-10"), Some(50), 0.0, 36.0),
            record(Some("2023-04-20"), None, -1.0, 37.0),
        ]
    }

    #[test]
    fn test_summary_all() {
        let records = sample();
        let retained = Season::All.filter(&records);
        let s = summarize(Season::All, &retained);
        assert_eq!(s.total_trees, 150);
        assert_eq!(s.records, 3);
        assert_eq!(s.rainy_pct, 66.7);
        assert_eq!(s.season, "All");
    }

    #[test]
    fn test_summary_empty() {
        let s = summarize(Season::Rainy, &[]);
        assert_eq!(s.total_trees, 0);
        assert_eq!(s.records, 0);
        assert_eq!(s.rainy_pct, 0.0);
        assert_eq!(map_center(&[]), None);
    }

    #[test]
    fn test_summary_per_season() {
        let records = sample();
        let rainy = summarize(Season::Rainy, &Season::Rainy.filter(&records));
        assert_eq!(rainy.total_trees, 100);
        assert_eq!(rainy.rainy_pct, 100.0);
        let dry = summarize(Season::Dry, &Season::Dry.filter(&records));
        assert_eq!(dry.total_trees, 50);
        assert_eq!(dry.rainy_pct, 0.0);
    }

    #[test]
    fn test_map_center() {
        let records = sample();
        let retained = Season::All.filter(&records);
        let (lat, lon) = map_center(&retained).unwrap();
        assert!((lat - 0.0).abs() < 1e-9);
        assert!((lon - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_trend() {
        let mut records = sample();
        records.push(record(None, Some(9), 0.0, 36.0));
        let retained = Season::All.filter(&records);
        let trend = monthly_trend(&retained);
        assert_eq!(trend.months.len(), 12);
        assert_eq!(trend.months[3].records, 2);
        assert_eq!(trend.months[3].seedlings, 100);
        assert!(trend.months[3].rainy);
        assert_eq!(trend.months[6].seedlings, 50);
        assert!(!trend.months[6].rainy);
        assert_eq!(trend.undated, 1);
        assert_eq!(trend.peak_month().map(|b| b.month), Some(4));
        assert_eq!(month_name(4), "Apr");
    }

    #[test]
    fn test_huge_counts_saturate() {
        let records = vec![
            record(Some("2023-04-10"), Some(u64::MAX), 1.0, 38.0),
            record(Some("2023-04-11"), Some(u64::MAX - 1), 1.0, 38.0),
            record(Some("2023-04-12"), Some(1), 1.0, 38.0),
        ];
        let retained = Season::All.filter(&records);
        let s = summarize(Season::All, &retained);
        assert_eq!(s.total_trees, u64::MAX);
        assert_eq!(s.records, 3);

        let trend = monthly_trend(&retained);
        assert_eq!(trend.months[3].seedlings, u64::MAX);
        assert_eq!(trend.months[3].records, 3);
    }

    #[test]
    fn test_peak_month_empty() {
        assert!(monthly_trend(&[]).peak_month().is_none());
    }
}
