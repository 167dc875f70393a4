use crate::equity::CountyRank;
use crate::summary::{month_name, MonthlyTrend, Summary};

/// Rainy-season share under which we suggest moving planting into the rains.
pub const RAINY_SHARE_TARGET: f64 = 50.0;

const OUTREACH_COUNTIES: usize = 3;

pub fn recommendations(
    summary: &Summary,
    trend: &MonthlyTrend,
    rankings: Option<&[CountyRank]>,
) -> Vec<String> {
    if summary.records == 0 {
        return vec!["No planting records match the current filters.".to_string()];
    }

    let mut notes = Vec::new();

    if let Some(peak) = trend.peak_month() {
        notes.push(format!(
            "{} is the busiest planting month with {} seedlings across {} events; schedule nursery stock ahead of it.",
            month_name(peak.month),
            peak.seedlings,
            peak.records
        ));
    }

    if summary.rainy_pct < RAINY_SHARE_TARGET {
        notes.push(format!(
            "Only {:.1}% of plantings fall in the rainy season. Shift planting into the March-May and October-December rains to improve seedling survival.",
            summary.rainy_pct
        ));
    } else {
        notes.push(format!(
            "{:.1}% of plantings already fall in the rainy season; keep aligning campaigns with the long and short rains.",
            summary.rainy_pct
        ));
    }

    if trend.undated > 0 {
        let (noun, verb) = if trend.undated == 1 {
            ("record", "has")
        } else {
            ("records", "have")
        };
        notes.push(format!(
            "{} {noun} {verb} no usable planting date; fix the source dates so they count towards seasonal trends.",
            trend.undated
        ));
    }

    if let Some(ranked) = rankings.filter(|r| !r.is_empty()) {
        let lowest: Vec<&str> = ranked
            .iter()
            .rev()
            .take(OUTREACH_COUNTIES)
            .map(|r| r.county.as_str())
            .collect();
        notes.push(format!(
            "Prioritize outreach in {}, which have the fewest trees per 10,000 residents.",
            lowest.join(", ")
        ));
    }

    notes
}
