//! Weather forecast model and lookup capability

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

pub const WARM_LAYERS: &str = "Pack warm layers and a heavy jacket";
pub const LIGHT_JACKET: &str = "Bring a light jacket or sweater";
pub const BREATHABLE_CLOTHING: &str = "Dress in light, breathable clothing";
pub const UMBRELLA: &str = "Don't forget an umbrella or rain jacket";
pub const WINTER_GEAR: &str = "Waterproof boots and winter gear recommended";
pub const SUN_PROTECTION: &str = "Sunscreen and sunglasses recommended";

/// One forecast period (typically a day or a night)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Local wall-clock start of the period
    pub date: NaiveDateTime,
    pub name: String,
    pub temperature: i32,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub is_daytime: bool,
}

impl WeatherForecast {
    pub fn new(date: NaiveDateTime, temperature: i32, short_forecast: impl Into<String>) -> Self {
        Self {
            date,
            name: String::new(),
            temperature,
            temperature_unit: "F".to_string(),
            short_forecast: short_forecast.into(),
            detailed_forecast: String::new(),
            wind_speed: String::new(),
            wind_direction: String::new(),
            is_daytime: true,
        }
    }

    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date()
    }

    /// Whether the short forecast mentions any of `keywords` (case-insensitive)
    pub fn mentions(&self, keywords: &[&str]) -> bool {
        let text = self.short_forecast.to_lowercase();
        keywords.iter().any(|k| text.contains(k))
    }

    /// Clothing and activity hints derived from temperature and conditions
    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();

        if self.temperature < 40 {
            hints.push(WARM_LAYERS);
        } else if self.temperature < 60 {
            hints.push(LIGHT_JACKET);
        } else if self.temperature > 85 {
            hints.push(BREATHABLE_CLOTHING);
        }

        if self.mentions(&["rain", "shower"]) {
            hints.push(UMBRELLA);
        }
        if self.mentions(&["snow"]) {
            hints.push(WINTER_GEAR);
        }
        if self.mentions(&["sunny", "clear"]) {
            hints.push(SUN_PROTECTION);
        }

        hints
    }
}

/// Weather-forecast lookup.
///
/// Production implementations return an empty list on transport or data
/// errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherForecast>, DomainError>;
}
