//! Travel plan request

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Travel style driving budget allocation and prompt tone.
///
/// Matching is case-insensitive; anything unrecognised is treated as
/// [`TravelStyle::Moderate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelStyle {
    Luxury,
    Budget,
    #[default]
    Moderate,
}

impl TravelStyle {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "luxury" => Self::Luxury,
            "budget" => Self::Budget,
            _ => Self::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Budget => "budget",
            Self::Moderate => "moderate",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sole input to a planning run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanRequest {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: Decimal,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default = "default_travel_style")]
    travel_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    special_requests: Option<String>,
}

fn default_travel_style() -> String {
    TravelStyle::Moderate.as_str().to_string()
}

impl TravelPlanRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: Decimal,
    ) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            budget,
            interests: Vec::new(),
            travel_style: default_travel_style(),
            special_requests: None,
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_travel_style(mut self, style: impl Into<String>) -> Self {
        self.travel_style = style.into();
        self
    }

    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = Some(requests.into());
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// Travel style exactly as submitted
    pub fn travel_style(&self) -> &str {
        &self.travel_style
    }

    pub fn style(&self) -> TravelStyle {
        TravelStyle::parse(&self.travel_style)
    }

    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Inclusive number of calendar days covered by the trip
    pub fn trip_days(&self) -> u32 {
        let span = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(span.max(0)).unwrap_or(0)
    }

    /// Whether any interest tag mentions the given keyword (case-insensitive)
    pub fn has_interest(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.interests
            .iter()
            .any(|i| i.to_lowercase().contains(&keyword))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.destination.trim().is_empty() {
            return Err(DomainError::validation("Destination cannot be empty"));
        }

        if self.end_date < self.start_date {
            return Err(DomainError::validation(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.budget <= Decimal::ZERO {
            return Err(DomainError::validation("Budget must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paris() -> TravelPlanRequest {
        TravelPlanRequest::new("Paris", date(2025, 6, 1), date(2025, 6, 5), dec!(3000))
    }

    #[test]
    fn test_trip_days_is_inclusive() {
        assert_eq!(paris().trip_days(), 5);

        let day_trip =
            TravelPlanRequest::new("Boston", date(2025, 6, 1), date(2025, 6, 1), dec!(100));
        assert_eq!(day_trip.trip_days(), 1);
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!(TravelStyle::parse("LUXURY"), TravelStyle::Luxury);
        assert_eq!(TravelStyle::parse(" budget "), TravelStyle::Budget);
        assert_eq!(TravelStyle::parse("moderate"), TravelStyle::Moderate);
        assert_eq!(TravelStyle::parse("backpacker"), TravelStyle::Moderate);
    }

    #[test]
    fn test_raw_style_is_preserved() {
        let request = paris().with_travel_style("Backpacker");
        assert_eq!(request.travel_style(), "Backpacker");
        assert_eq!(request.style(), TravelStyle::Moderate);
    }

    #[test]
    fn test_has_interest_matches_substring() {
        let request = paris().with_interests(["Day Hiking", "food"]);
        assert!(request.has_interest("hiking"));
        assert!(!request.has_interest("museums"));
    }

    #[test]
    fn test_blank_special_requests_are_ignored() {
        assert_eq!(paris().with_special_requests("  ").special_requests(), None);
        assert_eq!(
            paris().with_special_requests("vegetarian").special_requests(),
            Some("vegetarian")
        );
    }

    #[test]
    fn test_validation() {
        assert!(paris().validate().is_ok());

        let empty = TravelPlanRequest::new(" ", date(2025, 6, 1), date(2025, 6, 5), dec!(10));
        assert!(empty.validate().unwrap_err().is_validation());

        let reversed =
            TravelPlanRequest::new("Paris", date(2025, 6, 5), date(2025, 6, 1), dec!(10));
        assert!(reversed.validate().is_err());

        let broke = TravelPlanRequest::new("Paris", date(2025, 6, 1), date(2025, 6, 5), dec!(0));
        assert!(broke.validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "destination": "Tokyo",
            "startDate": "2025-03-01",
            "endDate": "2025-03-03",
            "budget": 2500
        }"#;

        let request: TravelPlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.destination(), "Tokyo");
        assert_eq!(request.budget(), dec!(2500));
        assert!(request.interests().is_empty());
        assert_eq!(request.travel_style(), "moderate");
        assert_eq!(request.trip_days(), 3);
    }
}
