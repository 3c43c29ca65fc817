//! National Weather Service forecast client (US locations only)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{DomainError, WeatherForecast, WeatherService};
use crate::infrastructure::http_client::{HttpClient, HttpClientTrait};

const DEFAULT_NWS_BASE_URL: &str = "https://api.weather.gov";
const DEFAULT_USER_AGENT: &str = "TravelPlanner/1.0 (travel-planner@example.com)";

/// Two-step lookup: grid point, then its forecast URL. NWS rejects requests
/// without a `User-Agent`.
///
/// Never fails: any error yields an empty forecast.
#[derive(Debug)]
pub struct NwsWeatherService<C: HttpClientTrait = HttpClient> {
    client: C,
    base_url: String,
    user_agent: String,
}

impl<C: HttpClientTrait> NwsWeatherService<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_NWS_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{:.4},{:.4}", self.base_url, latitude, longitude)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", "application/geo+json"),
        ]
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<WeatherForecast>, DomainError> {
        let points = self
            .client
            .get_json(&self.points_url(latitude, longitude), self.headers(), vec![])
            .await?;
        let points: PointsResponse = parse("points", points)?;

        let Some(forecast_url) = points.properties.and_then(|p| p.forecast) else {
            warn!(latitude, longitude, "No forecast URL found for location");
            return Ok(Vec::new());
        };

        let forecast = self
            .client
            .get_json(&forecast_url, self.headers(), vec![])
            .await?;
        let forecast: ForecastResponse = parse("forecast", forecast)?;

        let Some(periods) = forecast.properties.and_then(|p| p.periods) else {
            warn!(latitude, longitude, "No forecast periods found");
            return Ok(Vec::new());
        };

        // Day and night period per requested day
        let limit = days as usize * 2;
        Ok(periods.into_iter().take(limit).map(Period::into_domain).collect())
    }
}

fn parse<T: for<'de> Deserialize<'de>>(
    what: &str,
    body: serde_json::Value,
) -> Result<T, DomainError> {
    serde_json::from_value(body).map_err(|e| {
        DomainError::provider("nws", format!("Failed to parse {} response: {}", what, e))
    })
}

#[async_trait]
impl<C: HttpClientTrait> WeatherService for NwsWeatherService<C> {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherForecast>, DomainError> {
        info!(latitude, longitude, %start_date, days, "Fetching NWS forecast");

        match self.fetch(latitude, longitude, days).await {
            Ok(forecasts) => {
                info!(count = forecasts.len(), "Fetched forecast periods");
                Ok(forecasts)
            }
            Err(e) => {
                warn!(latitude, longitude, error = %e, "NWS forecast lookup failed");
                Ok(Vec::new())
            }
        }
    }
}

// NWS API types

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Option<Vec<Period>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Period {
    name: Option<String>,
    start_time: Option<String>,
    temperature: Option<i32>,
    temperature_unit: Option<String>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    short_forecast: Option<String>,
    detailed_forecast: Option<String>,
    is_daytime: Option<bool>,
}

impl Period {
    fn into_domain(self) -> WeatherForecast {
        // Keep the wall-clock time of the forecast office
        let date = self
            .start_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.naive_local())
            .unwrap_or_else(|| Utc::now().naive_utc());

        WeatherForecast {
            date,
            name: self.name.unwrap_or_else(|| "Unknown".to_string()),
            temperature: self.temperature.unwrap_or(0),
            temperature_unit: self.temperature_unit.unwrap_or_else(|| "F".to_string()),
            short_forecast: self.short_forecast.unwrap_or_default(),
            detailed_forecast: self.detailed_forecast.unwrap_or_default(),
            wind_speed: self.wind_speed.unwrap_or_default(),
            wind_direction: self.wind_direction.unwrap_or_default(),
            is_daytime: self.is_daytime.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn period(name: &str, start: &str, temperature: i32, short: &str) -> serde_json::Value {
        json!({
            "name": name,
            "startTime": start,
            "isDaytime": name != "Tonight",
            "temperature": temperature,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "windDirection": "NW",
            "shortForecast": short,
            "detailedForecast": format!("{} with a high near {}.", short, temperature)
        })
    }

    #[tokio::test]
    async fn test_forecast_two_step_lookup() {
        let server = MockServer::start().await;
        let forecast_url = format!("{}/gridpoints/OKX/33,35/forecast", server.uri());

        Mock::given(method("GET"))
            .and(path("/points/40.7128,-74.0060"))
            .and(header("user-agent", "TravelPlanner/1.0 (test)"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "forecast": forecast_url }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/gridpoints/OKX/33,35/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "periods": [
                        period("Today", "2025-06-01T06:00:00-04:00", 78, "Sunny"),
                        period("Tonight", "2025-06-01T18:00:00-04:00", 62, "Clear"),
                        period("Monday", "2025-06-02T06:00:00-04:00", 70, "Chance Rain Showers"),
                        period("Monday Night", "2025-06-02T18:00:00-04:00", 58, "Rain"),
                        period("Tuesday", "2025-06-03T06:00:00-04:00", 75, "Partly Sunny")
                    ]
                }
            })))
            .mount(&server)
            .await;

        let service = NwsWeatherService::with_base_url(HttpClient::new(), server.uri())
            .with_user_agent("TravelPlanner/1.0 (test)");
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let forecasts = service.forecast(40.7128, -74.0060, start, 2).await.unwrap();

        assert_eq!(forecasts.len(), 4);
        assert_eq!(forecasts[0].name, "Today");
        assert_eq!(forecasts[0].temperature, 78);
        assert_eq!(forecasts[0].calendar_date(), start);
        assert!(!forecasts[1].is_daytime);
        assert_eq!(forecasts[2].short_forecast, "Chance Rain Showers");
        assert_eq!(forecasts[3].wind_speed, "10 mph");
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let client = MockHttpClient::new()
            .with_response(
                "https://api.weather.gov/points/47.6062,-122.3321",
                json!({
                    "properties": {
                        "forecast": "https://api.weather.gov/gridpoints/SEW/1,1/forecast"
                    }
                }),
            )
            .with_response(
                "https://api.weather.gov/gridpoints/SEW/1,1/forecast",
                json!({
                    "properties": {
                        "periods": [ { "startTime": "2025-06-01T06:00:00-07:00" } ]
                    }
                }),
            );
        let service = NwsWeatherService::new(client);
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let forecasts = service.forecast(47.6062, -122.3321, start, 1).await.unwrap();

        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].name, "Unknown");
        assert_eq!(forecasts[0].temperature, 0);
        assert_eq!(forecasts[0].temperature_unit, "F");
        assert!(forecasts[0].is_daytime);
    }

    #[tokio::test]
    async fn test_no_forecast_url_is_empty() {
        let client = MockHttpClient::new().with_response(
            "https://api.weather.gov/points/25.7617,-80.1918",
            json!({ "properties": {} }),
        );
        let service = NwsWeatherService::new(client);
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let forecasts = service.forecast(25.7617, -80.1918, start, 3).await.unwrap();
        assert!(forecasts.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = NwsWeatherService::with_base_url(HttpClient::new(), server.uri());
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let forecasts = service.forecast(41.8781, -87.6298, start, 3).await.unwrap();
        assert!(forecasts.is_empty());
    }

    #[test]
    fn test_points_url_uses_four_decimals() {
        let service = NwsWeatherService::new(MockHttpClient::new());
        assert_eq!(
            service.points_url(38.9072, -77.0369),
            "https://api.weather.gov/points/38.9072,-77.0369"
        );
    }
}
