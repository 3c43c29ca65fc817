use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::join_interests;
use crate::domain::{DomainError, TextGenerator, WeatherForecast, WeatherService};

const INSTRUCTIONS: &str = "You are a weather and packing specialist. Analyze forecasts, provide \
packing recommendations, suggest activity modifications based on conditions, warn about severe \
weather, and recommend best times for outdoor activities.";

const FALLBACK_ADVICE: &str = "Unable to generate weather advice.";

/// Fetches forecasts and turns them into packing and activity advice
#[derive(Debug, Clone)]
pub struct WeatherAdvisorAgent {
    weather: Arc<dyn WeatherService>,
    generator: Arc<dyn TextGenerator>,
}

impl WeatherAdvisorAgent {
    pub const AGENT_TYPE: &'static str = "WeatherAdvisor";

    pub fn new(weather: Arc<dyn WeatherService>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { weather, generator }
    }

    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherForecast>, DomainError> {
        info!(latitude, longitude, days, "Getting weather forecast");
        self.weather
            .forecast(latitude, longitude, start_date, days)
            .await
    }

    pub async fn weather_advice(
        &self,
        forecasts: &[WeatherForecast],
        destination: &str,
        interests: &[String],
    ) -> Result<String, DomainError> {
        let prompt = build_advice_prompt(forecasts, destination, interests);

        debug!(
            destination,
            periods = forecasts.len(),
            agent = Self::AGENT_TYPE,
            "Requesting weather advice"
        );

        let answer = self.generator.generate(INSTRUCTIONS, &prompt).await?;
        Ok(answer.unwrap_or_else(|| FALLBACK_ADVICE.to_string()))
    }
}

fn describe_period(forecast: &WeatherForecast) -> String {
    format!(
        "{}: {}°{}, {}\nDetails: {}\nWind: {} {}",
        forecast.name,
        forecast.temperature,
        forecast.temperature_unit,
        forecast.short_forecast,
        forecast.detailed_forecast,
        forecast.wind_speed,
        forecast.wind_direction,
    )
}

fn build_advice_prompt(
    forecasts: &[WeatherForecast],
    destination: &str,
    interests: &[String],
) -> String {
    let periods = forecasts
        .iter()
        .map(describe_period)
        .collect::<Vec<_>>()
        .join("\n\n");
    let interests = join_interests(interests);

    format!(
        "Provide weather-based travel advice for {destination}:\n\
         \n\
         WEATHER FORECAST:\n\
         {periods}\n\
         \n\
         TRAVELER INTERESTS: {interests}\n\
         \n\
         Please provide:\n\
         1. Weather overview and what to expect\n\
         2. Detailed packing list based on these conditions\n\
         3. Activity recommendations that work well with this weather\n\
         4. Any weather-related warnings or precautions\n\
         5. Best times of day for outdoor activities\n\
         \n\
         Tailor your advice to their interests: {interests}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockTextGenerator;
    use crate::domain::travel::MockWeatherService;

    fn forecast() -> WeatherForecast {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        WeatherForecast {
            name: "Sunday".to_string(),
            detailed_forecast: "Sunny, with a high near 78.".to_string(),
            wind_speed: "5 to 10 mph".to_string(),
            wind_direction: "SW".to_string(),
            ..WeatherForecast::new(date, 78, "Sunny")
        }
    }

    #[tokio::test]
    async fn test_forecast_delegates() {
        let mut weather = MockWeatherService::new();
        weather
            .expect_forecast()
            .withf(|lat, lon, _, days| *lat == 47.6062 && *lon == -122.3321 && *days == 3)
            .times(1)
            .returning(|_, _, _, _| Ok(vec![forecast()]));

        let agent =
            WeatherAdvisorAgent::new(Arc::new(weather), Arc::new(MockTextGenerator::silent()));
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let forecasts = agent.forecast(47.6062, -122.3321, start, 3).await.unwrap();
        assert_eq!(forecasts.len(), 1);
    }

    #[tokio::test]
    async fn test_weather_advice_prompt() {
        let generator = Arc::new(MockTextGenerator::answering("Pack sunscreen."));
        let agent =
            WeatherAdvisorAgent::new(Arc::new(MockWeatherService::new()), generator.clone());
        let interests = vec!["hiking".to_string(), "food".to_string()];

        let advice = agent
            .weather_advice(&[forecast()], "Seattle", &interests)
            .await
            .unwrap();

        assert_eq!(advice, "Pack sunscreen.");
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains(
            "Sunday: 78°F, Sunny\nDetails: Sunny, with a high near 78.\nWind: 5 to 10 mph SW"
        ));
        assert!(prompt.contains("TRAVELER INTERESTS: hiking, food"));
        assert!(prompt.ends_with("Tailor your advice to their interests: hiking, food"));
    }

    #[tokio::test]
    async fn test_weather_advice_fallback() {
        let agent = WeatherAdvisorAgent::new(
            Arc::new(MockWeatherService::new()),
            Arc::new(MockTextGenerator::silent()),
        );

        let advice = agent.weather_advice(&[], "Miami", &[]).await.unwrap();
        assert_eq!(advice, FALLBACK_ADVICE);
    }
}
