use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

// Month-first before day-first: "04/10/2023" is April 10th.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%b-%Y", "%b %d, %Y", "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a planting date, keeping only the calendar day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = clean_str(raw);
    if s.is_empty() {
        return None;
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Some(d);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt.date());
    }
    // offset-carrying ISO timestamps keep their local calendar day
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Finite float or nothing; `NaN`/`inf` text counts as unparseable.
pub fn parse_float(raw: &str) -> Option<f64> {
    clean_str(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Non-negative integer count. Integral float text (`"100.0"`) is accepted.
pub fn parse_count(raw: &str) -> Option<u64> {
    let s = clean_str(raw);
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}
