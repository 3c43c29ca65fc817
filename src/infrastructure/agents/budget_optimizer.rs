use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::travel::format_grouped;
use crate::domain::{BudgetBreakdown, DomainError, TextGenerator, TravelStyle};

const INSTRUCTIONS: &str = "You are a travel budget optimization expert. Allocate budgets across \
accommodation, food, activities, and transport. Provide realistic cost estimates, suggest \
cost-saving strategies, identify low-cost alternatives, and always include an emergency fund.";

/// Splits the total budget across spending categories
#[derive(Debug, Clone)]
pub struct BudgetOptimizerAgent {
    generator: Arc<dyn TextGenerator>,
}

impl BudgetOptimizerAgent {
    pub const AGENT_TYPE: &'static str = "BudgetOptimizer";

    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// The generated advice is not parsed; the result is always the fixed
    /// allocation table for `travel_style`.
    pub async fn optimize_budget(
        &self,
        total_budget: Decimal,
        days: u32,
        destination: &str,
        travel_style: &str,
        itinerary_summary: &str,
    ) -> Result<BudgetBreakdown, DomainError> {
        let prompt = build_prompt(total_budget, days, destination, travel_style, itinerary_summary);

        debug!(destination, days, agent = Self::AGENT_TYPE, "Requesting budget advice");

        let advice = self.generator.generate(INSTRUCTIONS, &prompt).await?;
        debug!(has_advice = advice.is_some(), "Budget advice received");

        Ok(BudgetBreakdown::allocate(
            total_budget,
            TravelStyle::parse(travel_style),
        ))
    }
}

fn build_prompt(
    total_budget: Decimal,
    days: u32,
    destination: &str,
    travel_style: &str,
    itinerary_summary: &str,
) -> String {
    let budget = format_grouped(total_budget, 0);

    format!(
        "Optimize the budget allocation for a {days}-day trip to {destination}:\n\
         \n\
         BUDGET: ${budget} USD\n\
         TRAVEL STYLE: {travel_style}\n\
         DURATION: {days} days\n\
         \n\
         PLANNED ACTIVITIES:\n\
         {itinerary_summary}\n\
         \n\
         Please provide a detailed budget breakdown:\n\
         \n\
         1. BUDGET ALLOCATION (provide specific dollar amounts that total ${budget}):\n\
         \x20  - Accommodation: $[amount] ([percentage]% - explain choice)\n\
         \x20  - Food & Dining: $[amount] ([percentage]% - meals/day estimate)\n\
         \x20  - Activities & Attractions: $[amount] ([percentage]% - based on planned activities)\n\
         \x20  - Transportation: $[amount] ([percentage]% - flights, local transport, etc.)\n\
         \x20  - Shopping & Souvenirs: $[amount] ([percentage]%)\n\
         \x20  - Emergency Fund: $[amount] ([percentage]% - always include 5-10%)\n\
         \n\
         2. DAILY BUDGET GUIDELINE:\n\
         \x20  - Daily spending target: $[amount]/day\n\
         \x20  - Per meal budget: Breakfast $[X], Lunch $[Y], Dinner $[Z]\n\
         \x20  - Activities budget per day: $[amount]\n\
         \n\
         3. COST-SAVING TIPS FOR {destination}:\n\
         \x20  - [Specific tip 1]\n\
         \x20  - [Specific tip 2]\n\
         \x20  - [Specific tip 3]\n\
         \x20  - [Specific tip 4]\n\
         \x20  - [Specific tip 5]\n\
         \n\
         4. BUDGET WARNINGS:\n\
         \x20  - [Any seasonal pricing concerns]\n\
         \x20  - [Hidden costs to watch for]\n\
         \x20  - [Activities that may exceed budget]\n\
         \n\
         Ensure the breakdown matches the {travel_style} style and totals exactly ${budget}."
    )
}
