//! Server-side HTML for the dashboard pages.
//!
//! Pages are plain strings assembled with `format!`; the map and charts are
//! drawn in the browser by Leaflet and Chart.js from JSON embedded in the page.

pub mod charts;
pub mod map;
pub mod pages;

use serde::Serialize;

use crate::season::Season;

pub const APP_TITLE: &str = "Kenya Tree Planting Dashboard";

/// Destinations in the dashboard navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Overview,
    HotspotsMap,
    SeasonalTrends,
    EquityRankings,
    Recommendations,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::HotspotsMap,
        Page::SeasonalTrends,
        Page::EquityRankings,
        Page::Recommendations,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Overview => "/",
            Page::HotspotsMap => "/hotspots",
            Page::SeasonalTrends => "/trends",
            Page::EquityRankings => "/equity",
            Page::Recommendations => "/recommendations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::HotspotsMap => "Hotspots Map",
            Page::SeasonalTrends => "Seasonal Trends",
            Page::EquityRankings => "Equity Rankings",
            Page::Recommendations => "Recommendations",
        }
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON safe to drop inside a `<script>` element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

/// `1234567` → `"1,234,567"`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn or_na<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

pub fn page_url(page: Page, season: Season) -> String {
    format!("{}?season={}", page.path(), season.as_str())
}

/// Full document around a page body: navigation, season selector, styling.
pub fn layout(page: Page, season: Season, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title} · {app}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" referrerpolicy="no-referrer" />
    <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>{css}</style>
</head>
<body>
    <aside class="sidebar">
        <h2>Navigation</h2>
        <nav>{nav}</nav>
        <h2>Filters</h2>
        {selector}
    </aside>
    <main>
        <h1>🌳 {app}</h1>
        <h2 class="page-title">{page_title}</h2>
        {body}
    </main>
</body>
</html>"#,
        app = APP_TITLE,
        page_title = page.title(),
        css = inline_css(),
        nav = render_nav(page, season),
        selector = render_season_selector(page, season),
        body = body,
    )
}

fn render_nav(current: Page, season: Season) -> String {
    Page::ALL
        .iter()
        .map(|p| {
            let class = if *p == current { " class=\"active\"" } else { "" };
            format!(
                r#"<a href="{href}"{class}>{title}</a>"#,
                href = page_url(*p, season),
                class = class,
                title = p.title(),
            )
        })
        .collect()
}

fn render_season_selector(page: Page, season: Season) -> String {
    let options: String = Season::ALL
        .iter()
        .map(|s| {
            format!(
                r#"<label><input type="radio" name="season" value="{value}"{checked} onchange="this.form.submit()"> {label}</label>"#,
                value = s.as_str(),
                checked = if *s == season { " checked" } else { "" },
                label = s.label(),
            )
        })
        .collect();
    format!(
        r#"<form method="get" action="{action}" class="season">
    <fieldset><legend>Season</legend>{options}</fieldset>
    <noscript><button type="submit">Apply</button></noscript>
</form>"#,
        action = page.path(),
        options = options,
    )
}

/// Shown in place of a map, chart or table when the retained set is empty.
pub fn warning(message: &str) -> String {
    format!(r#"<div class="warning">{}</div>"#, html_escape(message))
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; display: flex; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #1f2933; }
.sidebar { width: 220px; min-height: 100vh; background: #f0f4f1; padding: 1rem; box-sizing: border-box; }
.sidebar h2 { font-size: 1rem; margin: 1rem 0 .5rem; }
.sidebar nav a { display: block; padding: .35rem .5rem; color: #1f2933; text-decoration: none; border-radius: 4px; }
.sidebar nav a.active { background: #2f855a; color: #fff; }
.season fieldset { border: none; padding: 0; }
.season label { display: block; padding: .2rem 0; }
main { flex: 1; padding: 1rem 2rem; overflow-x: auto; }
.metrics { display: flex; gap: 1rem; margin: 1rem 0; }
.metric { flex: 1; background: #fff; border: 1px solid #d9e2dc; border-radius: 8px; padding: .75rem 1rem; }
.metric h3 { margin: 0; font-size: .85rem; color: #52606d; font-weight: normal; }
.metric .value { font-size: 1.8rem; font-weight: 600; }
.map { width: 800px; max-width: 100%; height: 600px; border-radius: 8px; }
.map.large { width: 100%; height: 75vh; }
.warning { background: #fffbea; border: 1px solid #f0b429; padding: .75rem 1rem; border-radius: 6px; margin: 1rem 0; }
table { border-collapse: collapse; font-size: .85rem; margin: 1rem 0; }
th, td { border-bottom: 1px solid #e4e7eb; padding: .3rem .6rem; text-align: left; }
th { background: #f5f7fa; }
.note { color: #52606d; font-size: .85rem; }
.download { display: inline-block; margin: .5rem 0 2rem; padding: .5rem 1rem; background: #2f855a; color: #fff; border-radius: 6px; text-decoration: none; }
.chart { max-width: 900px; }
ul.recs li { margin: .5rem 0; }
"#
}
