/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Coarse box around Kenya.
pub const KENYA: BoundingBox = BoundingBox {
    min_lat: -5.0,
    max_lat: 5.0,
    min_lon: 33.0,
    max_lon: 42.0,
};

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kenya_edges_are_inclusive() {
        assert!(KENYA.contains(-5.0, 33.0));
        assert!(KENYA.contains(5.0, 42.0));
        assert!(KENYA.contains(1.0, 38.0));
        assert!(!KENYA.contains(95.0, 38.0));
        assert!(!KENYA.contains(1.0, 42.0001));
        assert!(!KENYA.contains(-5.1, 36.0));
    }
}
