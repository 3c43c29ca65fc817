use std::sync::Arc;

use tracing::debug;

use super::join_interests;
use crate::domain::travel::format_grouped;
use crate::domain::{DomainError, TextGenerator, TravelPlanRequest, WeatherForecast};

const INSTRUCTIONS: &str = "You are an expert travel itinerary planner. Create detailed day-by-day \
plans with specific timing, realistic travel times, actual venues, meal recommendations, and \
weather considerations. Balance popular sites with hidden gems. Match activities to interests \
and travel style.";

const FALLBACK_ITINERARY: &str = "Unable to generate itinerary.";
const NO_FORECAST: &str = "Weather forecast not available";

const DAY_STRUCTURE: &str = "Please create a comprehensive day-by-day itinerary with the following structure for EACH day:

DAY [X] - [Date] - [Theme/Focus]

MORNING (9:00 AM - 12:00 PM):
- Activity: [Specific venue/attraction name]
- Description: [What to do and why it's special]
- Duration: [How long to spend]
- Cost estimate: $[amount]
- Weather consideration: [Adjust for forecast if needed]

LUNCH (12:00 PM - 1:30 PM):
- Restaurant/Area: [Specific recommendation]
- Cuisine: [Type of food]
- Description: [Why this choice]
- Cost estimate: $[amount]

AFTERNOON (2:00 PM - 6:00 PM):
- Activity: [Specific venue/attraction name]
- Description: [What to do and why it's special]
- Duration: [How long to spend]
- Cost estimate: $[amount]
- Weather consideration: [Adjust for forecast if needed]

DINNER (7:00 PM - 9:00 PM):
- Restaurant/Area: [Specific recommendation]
- Cuisine: [Type of food]
- Description: [Why this choice]
- Cost estimate: $[amount]

EVENING (9:00 PM - 11:00 PM) [Optional]:
- Activity: [Nightlife, shows, or relaxation]
- Description: [What to do]
- Cost estimate: $[amount]

DAILY TIPS:
- [Transportation advice for the day]
- [Any reservations needed]
- [Weather-specific tips]
- [Time-saving suggestions]

---";

/// Writes the day-by-day plan from the gathered context
#[derive(Debug, Clone)]
pub struct ItineraryPlannerAgent {
    generator: Arc<dyn TextGenerator>,
}

impl ItineraryPlannerAgent {
    pub const AGENT_TYPE: &'static str = "ItineraryPlanner";

    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Free-form itinerary text; the fallback sentence when the model is silent
    pub async fn create_itinerary(
        &self,
        request: &TravelPlanRequest,
        forecasts: &[WeatherForecast],
        local_knowledge: &str,
    ) -> Result<String, DomainError> {
        let prompt = build_prompt(request, &weather_summary(forecasts), local_knowledge);

        debug!(
            destination = request.destination(),
            days = request.trip_days(),
            agent = Self::AGENT_TYPE,
            "Requesting itinerary"
        );

        let answer = self.generator.generate(INSTRUCTIONS, &prompt).await?;
        Ok(answer.unwrap_or_else(|| FALLBACK_ITINERARY.to_string()))
    }
}

/// One line per calendar date, taken from the first period of that date:
/// `Jun 01: 78°F, Sunny`
pub fn weather_summary(forecasts: &[WeatherForecast]) -> String {
    if forecasts.is_empty() {
        return NO_FORECAST.to_string();
    }

    let mut seen = Vec::new();
    let mut lines = Vec::new();
    for forecast in forecasts {
        let date = forecast.calendar_date();
        if seen.contains(&date) {
            continue;
        }
        seen.push(date);
        lines.push(format!(
            "{}: {}°{}, {}",
            date.format("%b %d"),
            forecast.temperature,
            forecast.temperature_unit,
            forecast.short_forecast
        ));
    }

    lines.join("\n")
}

/// Whole dollars with thousands separators
fn dollars(request: &TravelPlanRequest) -> String {
    format_grouped(request.budget(), 0)
}

fn build_prompt(request: &TravelPlanRequest, weather: &str, local_knowledge: &str) -> String {
    let days = request.trip_days();
    let destination = request.destination();
    let interests = join_interests(request.interests());
    let style = request.travel_style();
    let budget = dollars(request);
    let special = request
        .special_requests()
        .map(|r| format!("- Special Requests: {}", r))
        .unwrap_or_default();

    format!(
        "Create a detailed {days}-day itinerary for {destination}:\n\
         \n\
         TRAVEL DETAILS:\n\
         - Destination: {destination}\n\
         - Dates: {start} to {end} ({days} days)\n\
         - Budget: ${budget} USD\n\
         - Interests: {interests}\n\
         - Travel Style: {style}\n\
         {special}\n\
         \n\
         WEATHER FORECAST:\n\
         {weather}\n\
         \n\
         LOCAL KNOWLEDGE & TIPS:\n\
         {local_knowledge}\n\
         \n\
         {DAY_STRUCTURE}\n\
         \n\
         Please create this detailed structure for all {days} days. Make sure:\n\
         1. Activities match their interests: {interests}\n\
         2. The {style} travel style is reflected\n\
         3. Weather forecast is considered for each day\n\
         4. Budget stays within ${budget}\n\
         5. Include both popular sites and local experiences\n\
         6. Timing is realistic with travel time between locations",
        start = request.start_date().format("%b %d"),
        end = request.end_date().format("%b %d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockTextGenerator;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn request() -> TravelPlanRequest {
        TravelPlanRequest::new(
            "Paris, France",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            dec!(3000),
        )
        .with_interests(["museums", "hiking"])
        .with_travel_style("luxury")
    }

    #[test]
    fn test_weather_summary_first_period_per_date() {
        let forecasts = vec![
            WeatherForecast::new(at(1, 6), 78, "Sunny"),
            WeatherForecast::new(at(1, 18), 60, "Clear"),
            WeatherForecast::new(at(2, 6), 70, "Rain Showers"),
        ];

        assert_eq!(
            weather_summary(&forecasts),
            "Jun 01: 78°F, Sunny\nJun 02: 70°F, Rain Showers"
        );
    }

    #[test]
    fn test_weather_summary_empty() {
        assert_eq!(weather_summary(&[]), "Weather forecast not available");
    }

    #[tokio::test]
    async fn test_create_itinerary_prompt() {
        let generator = Arc::new(MockTextGenerator::answering("DAY 1 - Louvre"));
        let agent = ItineraryPlannerAgent::new(generator.clone());

        let text = agent
            .create_itinerary(&request(), &[], "Cafés open late.")
            .await
            .unwrap();

        assert_eq!(text, "DAY 1 - Louvre");
        let prompt = &generator.prompts()[0];
        assert!(prompt.starts_with("Create a detailed 3-day itinerary for Paris, France:"));
        assert!(prompt.contains("- Dates: Jun 01 to Jun 03 (3 days)"));
        assert!(prompt.contains("- Budget: $3,000 USD"));
        assert!(prompt.contains("- Interests: museums, hiking"));
        assert!(prompt.contains("- Travel Style: luxury"));
        assert!(!prompt.contains("Special Requests"));
        assert!(prompt.contains("WEATHER FORECAST:\nWeather forecast not available"));
        assert!(prompt.contains("LOCAL KNOWLEDGE & TIPS:\nCafés open late."));
        assert!(prompt.contains("2. The luxury travel style is reflected"));
        assert!(prompt.contains("4. Budget stays within $3,000"));
    }

    #[tokio::test]
    async fn test_special_requests_line() {
        let generator = Arc::new(MockTextGenerator::answering("ok"));
        let agent = ItineraryPlannerAgent::new(generator.clone());
        let request = request().with_special_requests("vegetarian");

        agent.create_itinerary(&request, &[], "").await.unwrap();

        assert!(generator.prompts()[0].contains("- Special Requests: vegetarian"));
    }

    #[tokio::test]
    async fn test_fallback_text() {
        let agent = ItineraryPlannerAgent::new(Arc::new(MockTextGenerator::silent()));
        let text = agent.create_itinerary(&request(), &[], "").await.unwrap();
        assert_eq!(text, "Unable to generate itinerary.");
    }
}
