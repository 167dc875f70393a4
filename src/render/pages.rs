use super::{charts::bar_chart, html_escape, map::render_map, or_na, thousands, warning};
use crate::equity::CountyRank;
use crate::load::columns::COLUMNS;
use crate::model::PlantingRecord;
use crate::season::Season;
use crate::summary::{month_name, MonthlyTrend, Summary};

const RAINY_COLOR: &str = "#2f855a";
const DRY_COLOR: &str = "#d69e2e";

pub fn metric_cards(summary: &Summary) -> String {
    format!(
        r#"<div class="metrics">
    <div class="metric"><h3>Total Trees</h3><div class="value">{trees}</div></div>
    <div class="metric"><h3>Records</h3><div class="value">{records}</div></div>
    <div class="metric"><h3>Rainy Season %</h3><div class="value">{pct:.1}%</div></div>
</div>"#,
        trees = thousands(summary.total_trees),
        records = summary.records,
        pct = summary.rainy_pct,
    )
}

/// Filtered records with their derived month and season flag, capped at `limit` rows.
pub fn data_table(retained: &[&PlantingRecord], limit: usize) -> String {
    let header: String = COLUMNS
        .iter()
        .chain(["month", "is_rainy"].iter())
        .map(|c| format!("<th>{c}</th>"))
        .collect();

    if retained.is_empty() {
        return format!(
            r#"<table><thead><tr>{header}</tr></thead><tbody><tr><td colspan="{span}">No rows.</td></tr></tbody></table>"#,
            header = header,
            span = COLUMNS.len() + 2,
        );
    }

    let rows: String = retained
        .iter()
        .take(limit)
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&r.gps_raw),
                or_na(r.planting_date),
                or_na(r.seedlings_planted),
                html_escape(&r.month_year),
                r.latitude,
                r.longitude,
                or_na(r.temperature),
                or_na(r.rainfall),
                or_na(r.month()),
                r.is_rainy_season(),
            )
        })
        .collect();

    let note = if retained.len() > limit {
        format!(
            r#"<p class="note">Showing the first {} of {} rows. Download the CSV for all of them.</p>"#,
            thousands(limit as u64),
            thousands(retained.len() as u64)
        )
    } else {
        String::new()
    };

    format!("<table><thead><tr>{header}</tr></thead><tbody>\n{rows}</tbody></table>\n{note}")
}

fn download_link(season: Season) -> String {
    format!(
        r#"<a class="download" href="/download?season={}">Download CSV</a>"#,
        season.as_str()
    )
}

pub fn overview(
    season: Season,
    summary: &Summary,
    retained: &[&PlantingRecord],
    table_rows: usize,
) -> String {
    format!(
        "{metrics}\n{map}\n<h3>Filtered Data</h3>\n{table}\n{download}",
        metrics = metric_cards(summary),
        map = render_map("map", retained, false),
        table = data_table(retained, table_rows),
        download = download_link(season),
    )
}

pub fn hotspots(summary: &Summary, retained: &[&PlantingRecord]) -> String {
    format!(
        r#"<p class="note">{} planting events, {} seedlings.</p>
{}"#,
        thousands(summary.records as u64),
        thousands(summary.total_trees),
        render_map("hotspots", retained, true),
    )
}

pub fn trends(trend: &MonthlyTrend) -> String {
    if trend.months.iter().all(|b| b.records == 0) {
        return warning("No dated planting records for the selected filters.");
    }
    let labels: Vec<String> = trend
        .months
        .iter()
        .map(|b| month_name(b.month).to_string())
        .collect();
    let values: Vec<f64> = trend.months.iter().map(|b| b.seedlings as f64).collect();
    let colors: Vec<&str> = trend
        .months
        .iter()
        .map(|b| if b.rainy { RAINY_COLOR } else { DRY_COLOR })
        .collect();

    let rows: String = trend
        .months
        .iter()
        .map(|b| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                month_name(b.month),
                if b.rainy { "Rainy" } else { "Dry" },
                thousands(b.records as u64),
                thousands(b.seedlings),
            )
        })
        .collect();

    let undated = if trend.undated > 0 {
        format!(
            r#"<p class="note">{} records without a planting date are not shown.</p>"#,
            thousands(trend.undated as u64)
        )
    } else {
        String::new()
    };

    format!(
        r#"<p class="note">Seedlings planted per month. Green bars are rainy-season months.</p>
{chart}
<table><thead><tr><th>Month</th><th>Season</th><th>Records</th><th>Seedlings</th></tr></thead><tbody>{rows}</tbody></table>
{undated}"#,
        chart = bar_chart("trend", "Seedlings", &labels, &values, &colors),
        rows = rows,
        undated = undated,
    )
}

pub fn equity(rankings: Option<&[CountyRank]>) -> String {
    let ranked = match rankings {
        Some(r) if !r.is_empty() => r,
        Some(_) => return warning("The county table has no counties with a population."),
        None => {
            return warning("No county table configured. Start the dashboard with --counties <file> to see equity rankings.")
        }
    };

    let labels: Vec<String> = ranked.iter().map(|r| r.county.clone()).collect();
    let values: Vec<f64> = ranked.iter().map(|r| r.trees_per_10k).collect();
    let colors = vec![RAINY_COLOR; ranked.len()];
    let rows: String = ranked
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td></tr>",
                r.rank,
                html_escape(&r.county),
                thousands(r.trees_planted.max(0.0).round() as u64),
                thousands(r.population.round() as u64),
                r.trees_per_10k,
            )
        })
        .collect();

    format!(
        r#"<p class="note">Counties ranked by trees planted per 10,000 residents.</p>
{chart}
<table><thead><tr><th>Rank</th><th>County</th><th>Trees planted</th><th>Population</th><th>Trees per 10k</th></tr></thead><tbody>{rows}</tbody></table>"#,
        chart = bar_chart("equity", "Trees per 10k", &labels, &values, &colors),
        rows = rows,
    )
}

pub fn recommendations(notes: &[String]) -> String {
    let items: String = notes
        .iter()
        .map(|n| format!("<li>{}</li>", html_escape(n)))
        .collect();
    format!(r#"<ul class="recs">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;
    use crate::summary::{monthly_trend, summarize};

    #[test]
    fn test_metric_cards_format() {
        let s = Summary {
            season: "All",
            total_trees: 12345,
            records: 3,
            rainy_pct: 66.7,
        };
        let html = metric_cards(&s);
        assert!(html.contains("12,345"));
        assert!(html.contains("66.7%"));
    }

    #[test]
    fn test_data_table_cap_and_escape() {
        let mut a = record(Some("2023-04-10"), Some(100), 1.0, 38.0);
        a.gps_raw = "<script>".to_string();
        let b = record(None, None, 1.0, 38.0);
        let html = data_table(&[&a, &b], 1);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Showing the first 1 of 2 rows"));
        assert_eq!(html.matches("<tr><td>").count(), 1);
    }

    #[test]
    fn test_empty_overview() {
        let s = summarize(Season::Rainy, &[]);
        let html = overview(Season::Rainy, &s, &[], 100);
        assert!(html.contains("No data available for selected filters."));
        assert!(html.contains("No rows."));
        assert!(html.contains("/download?season=rainy"));
    }

    #[test]
    fn test_trends_page() {
        let a = record(Some("2023-04-10"), Some(100), 1.0, 38.0);
        let html = trends(&monthly_trend(&[&a]));
        assert!(html.contains("<canvas id=\"trend\">"));
        assert!(html.contains("<td>Apr</td><td>Rainy</td><td>1</td><td>100</td>"));

        let html = trends(&monthly_trend(&[]));
        assert!(html.contains("No dated planting records"));
    }

    #[test]
    fn test_equity_without_table() {
        assert!(equity(None).contains("--counties"));
    }
}
