//! Planning agents
//!
//! Each agent pairs a fixed persona (sent as the system instructions) with
//! prompt templates for its task. Agents that own a lookup collaborator
//! (currency, weather) expose the raw lookup alongside the advice call.

mod budget_optimizer;
mod currency_converter;
mod itinerary_planner;
mod local_knowledge;
mod weather_advisor;

pub use budget_optimizer::BudgetOptimizerAgent;
pub use currency_converter::CurrencyConverterAgent;
pub use itinerary_planner::{weather_summary, ItineraryPlannerAgent};
pub use local_knowledge::LocalKnowledgeAgent;
pub use weather_advisor::WeatherAdvisorAgent;

/// Joins interest tags for prompt text
fn join_interests(interests: &[String]) -> String {
    interests.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_interests() {
        assert_eq!(join_interests(&[]), "");
        assert_eq!(
            join_interests(&["food".to_string(), "museums".to_string()]),
            "food, museums"
        );
    }
}
