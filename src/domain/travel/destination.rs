//! Destination lookups: local currency and coordinates

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub const HOME_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const UNKNOWN: Coordinates = Coordinates::new(0.0, 0.0);

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `(0, 0)` marks a destination with no known location
    pub fn is_unknown(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Maps a free-text destination to the inputs of the gatherers
#[cfg_attr(test, automock)]
pub trait DestinationResolver: Send + Sync + Debug {
    /// ISO currency code used at the destination; `USD` when unknown
    fn currency_for(&self, destination: &str) -> String;

    /// Location of the destination; [`Coordinates::UNKNOWN`] when unknown
    fn coordinates_for(&self, destination: &str) -> Coordinates;
}

const CURRENCY_TABLE: &[(&[&str], &str)] = &[
    (&["paris", "france"], "EUR"),
    (&["london", "uk", "england"], "GBP"),
    (&["tokyo", "japan"], "JPY"),
    (&["mexico"], "MXN"),
    (&["canada"], "CAD"),
];

const COORDINATE_TABLE: &[(&[&str], Coordinates)] = &[
    (&["new york"], Coordinates::new(40.7128, -74.0060)),
    (&["los angeles"], Coordinates::new(34.0522, -118.2437)),
    (&["chicago"], Coordinates::new(41.8781, -87.6298)),
    (&["san francisco"], Coordinates::new(37.7749, -122.4194)),
    (&["miami"], Coordinates::new(25.7617, -80.1918)),
    (&["seattle"], Coordinates::new(47.6062, -122.3321)),
    (&["boston"], Coordinates::new(42.3601, -71.0589)),
    (&["washington", "dc"], Coordinates::new(38.9072, -77.0369)),
];

/// Ordered substring tables; first match wins, matching is case-insensitive
#[derive(Debug, Clone, Default)]
pub struct KeywordDestinationResolver;

impl KeywordDestinationResolver {
    pub fn new() -> Self {
        Self
    }

    fn lookup<T: Copy>(table: &[(&[&str], T)], destination: &str) -> Option<T> {
        let destination = destination.to_lowercase();
        table
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| destination.contains(k)))
            .map(|(_, value)| *value)
    }
}

impl DestinationResolver for KeywordDestinationResolver {
    fn currency_for(&self, destination: &str) -> String {
        Self::lookup(CURRENCY_TABLE, destination)
            .unwrap_or(HOME_CURRENCY)
            .to_string()
    }

    fn coordinates_for(&self, destination: &str) -> Coordinates {
        Self::lookup(COORDINATE_TABLE, destination).unwrap_or(Coordinates::UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_lookup() {
        let resolver = KeywordDestinationResolver::new();

        assert_eq!(resolver.currency_for("Paris"), "EUR");
        assert_eq!(resolver.currency_for("Lyon, FRANCE"), "EUR");
        assert_eq!(resolver.currency_for("London"), "GBP");
        assert_eq!(resolver.currency_for("Kyoto, Japan"), "JPY");
        assert_eq!(resolver.currency_for("Mexico City"), "MXN");
        assert_eq!(resolver.currency_for("Vancouver, Canada"), "CAD");
        assert_eq!(resolver.currency_for("Denver"), "USD");
    }

    #[test]
    fn test_currency_first_match_wins() {
        let resolver = KeywordDestinationResolver::new();
        // "paris" precedes "uk" in the table
        assert_eq!(resolver.currency_for("Paris to UK"), "EUR");
    }

    #[test]
    fn test_coordinates_lookup() {
        let resolver = KeywordDestinationResolver::new();

        assert_eq!(
            resolver.coordinates_for("New York City"),
            Coordinates::new(40.7128, -74.0060)
        );
        assert_eq!(
            resolver.coordinates_for("Washington, DC"),
            Coordinates::new(38.9072, -77.0369)
        );
        assert!(resolver.coordinates_for("Paris").is_unknown());
    }

    #[test]
    fn test_unknown_requires_both_zero() {
        assert!(Coordinates::UNKNOWN.is_unknown());
        assert!(!Coordinates::new(0.0, 12.5).is_unknown());
    }
}
