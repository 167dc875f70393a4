use crate::model::PlantingRecord;

/// Months covering the long (MAM) and short (OND) rains.
pub const RAINY_MONTHS: [u32; 6] = [3, 4, 5, 10, 11, 12];

pub fn is_rainy_month(month: u32) -> bool {
    RAINY_MONTHS.contains(&month)
}

/// Season selector shown in the dashboard sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Season {
    #[default]
    All,
    Rainy,
    Dry,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::All, Season::Rainy, Season::Dry];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::All => "all",
            Season::Rainy => "rainy",
            Season::Dry => "dry",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::All => "All",
            Season::Rainy => "Rainy",
            Season::Dry => "Dry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Season::All),
            "rainy" => Some(Season::Rainy),
            "dry" => Some(Season::Dry),
            _ => None,
        }
    }

    /// Undated records are never rainy, so they land in `Dry`.
    pub fn matches(&self, record: &PlantingRecord) -> bool {
        match self {
            Season::All => true,
            Season::Rainy => record.is_rainy_season(),
            Season::Dry => !record.is_rainy_season(),
        }
    }

    /// The retained set for this selector, in source order.
    pub fn filter<'a>(&self, records: &'a [PlantingRecord]) -> Vec<&'a PlantingRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    fn sample() -> Vec<PlantingRecord> {
        vec![
            record(Some("2023-04-10"), Some(100), 1.0, 38.0),
            record(Some("2023-07-10"), Some(50), 0.5, 37.0),
            record(Some("2023-11-02"), Some(20), -1.0, 36.8),
            record(None, Some(5), -2.0, 39.0),
            record(Some("2023-01-20"), None, 2.0, 35.0),
        ]
    }

    #[test]
    fn test_rainy_months() {
        for m in 1..=12 {
            assert_eq!(is_rainy_month(m), matches!(m, 3 | 4 | 5 | 10 | 11 | 12));
        }
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(Season::from_str("Rainy"), Some(Season::Rainy));
        assert_eq!(Season::from_str(" dry "), Some(Season::Dry));
        assert_eq!(Season::from_str("ALL"), Some(Season::All));
        assert_eq!(Season::from_str("monsoon"), None);
        for s in Season::ALL {
            assert_eq!(Season::from_str(s.as_str()), Some(s));
        }
    }

    #[test]
    fn test_rainy_and_dry_partition_all() {
        let records = sample();
        let all = Season::All.filter(&records);
        let rainy = Season::Rainy.filter(&records);
        let dry = Season::Dry.filter(&records);

        assert_eq!(all.len(), records.len());
        assert_eq!(rainy.len() + dry.len(), all.len());
        for r in &rainy {
            assert!(!dry.iter().any(|d| std::ptr::eq(*d, *r)));
        }
        // undated record is in the dry set
        assert!(dry.iter().any(|r| r.planting_date.is_none()));
    }
}
