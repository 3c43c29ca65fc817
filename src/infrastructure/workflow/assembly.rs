//! Final assembly of the travel plan from the workflow context

use rust_decimal::Decimal;

use crate::domain::travel::{Activity, DayPlan, EmergencyInfo};
use crate::domain::{
    BudgetBreakdown, CurrencyConversion, TravelItinerary, TravelPlanRequest, WeatherForecast,
    WorkflowState,
};

pub const GENERAL_TIPS: [&str; 3] = [
    "📱 Download offline maps of your destination",
    "💳 Notify your bank of travel dates to avoid card issues",
    "📋 Keep copies of important documents (passport, insurance)",
];

pub const BASE_PACKING_ITEMS: [&str; 5] = [
    "Passport and travel documents",
    "Phone charger and power adapter",
    "Comfortable walking shoes",
    "Reusable water bottle",
    "Basic first aid kit",
];

const MAX_WEATHER_TIPS: usize = 3;
const EXCERPT_CHARS: usize = 500;

/// Itinerary prefix handed to the budget optimizer
pub fn itinerary_excerpt(itinerary: &str) -> String {
    match itinerary.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &itinerary[..cut]),
        None => itinerary.to_string(),
    }
}

/// Currency summary, up to three distinct weather hints, then general tips
pub fn travel_tips(
    currency: Option<&CurrencyConversion>,
    forecasts: &[WeatherForecast],
) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(conversion) = currency {
        tips.push(format!("💱 {}", conversion.summary()));
    }

    let mut hints: Vec<&str> = Vec::new();
    for hint in forecasts.iter().flat_map(WeatherForecast::recommendations) {
        if hints.len() == MAX_WEATHER_TIPS {
            break;
        }
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    tips.extend(hints.into_iter().map(|h| format!("☀️ {}", h)));

    tips.extend(GENERAL_TIPS.iter().map(|t| t.to_string()));
    tips
}

pub fn packing_list(request: &TravelPlanRequest, forecasts: &[WeatherForecast]) -> Vec<String> {
    let mut items: Vec<String> = BASE_PACKING_ITEMS.iter().map(|i| i.to_string()).collect();

    if !forecasts.is_empty() {
        let average = forecasts.iter().map(|f| f.temperature as f64).sum::<f64>()
            / forecasts.len() as f64;

        if average < 50.0 {
            items.push("Warm jacket and layers".to_string());
            items.push("Cold weather accessories (hat, gloves)".to_string());
        } else if average > 75.0 {
            items.push("Sunscreen and sunglasses".to_string());
            items.push("Light, breathable clothing".to_string());
        }

        if forecasts.iter().any(|f| f.mentions(&["rain"])) {
            items.push("Umbrella or rain jacket".to_string());
        }
    }

    if request.has_interest("hiking") {
        items.push("Hiking boots and daypack".to_string());
    }

    items
}

/// The whole itinerary text is kept as one morning activity on day one
fn overview_day(request: &TravelPlanRequest, itinerary: &str) -> DayPlan {
    let theme = format!(
        "{}-Day {} Itinerary",
        request.trip_days(),
        request.destination()
    );

    DayPlan::new(1, request.start_date(), theme).with_morning(
        Activity::new(request.destination(), itinerary).with_cost(Decimal::ZERO),
    )
}

pub fn assemble(
    request: &TravelPlanRequest,
    state: &WorkflowState,
    itinerary: &str,
    budget: BudgetBreakdown,
) -> TravelItinerary {
    let forecasts = state.weather_forecasts();

    TravelItinerary {
        task_id: state.task_id().to_string(),
        destination: request.destination().to_string(),
        start_date: request.start_date(),
        end_date: request.end_date(),
        daily_plans: vec![overview_day(request, itinerary)],
        budget,
        travel_tips: travel_tips(state.currency_conversion(), forecasts),
        packing_list: packing_list(request, forecasts),
        emergency_info: EmergencyInfo::for_destination(request.destination()),
    }
}
