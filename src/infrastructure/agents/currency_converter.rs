use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{CurrencyConversion, CurrencyService, DomainError, TextGenerator};

const INSTRUCTIONS: &str = "You are a currency conversion specialist. Convert budgets to local \
currencies, provide exchange rate information, suggest optimal currency strategies, and explain \
exchange fees. Help travelers understand their spending power.";

const FALLBACK_ADVICE: &str = "Unable to generate currency advice.";

/// Converts the travel budget and explains what it buys locally
#[derive(Debug, Clone)]
pub struct CurrencyConverterAgent {
    currency: Arc<dyn CurrencyService>,
    generator: Arc<dyn TextGenerator>,
}

impl CurrencyConverterAgent {
    pub const AGENT_TYPE: &'static str = "CurrencyConverter";

    pub fn new(currency: Arc<dyn CurrencyService>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            currency,
            generator,
        }
    }

    pub async fn convert_budget(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<CurrencyConversion, DomainError> {
        info!(%amount, from, to, "Converting budget");
        self.currency.convert_amount(amount, from, to).await
    }

    /// Conversion followed by free-form advice about money at the destination
    pub async fn currency_advice(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        destination: &str,
    ) -> Result<String, DomainError> {
        let conversion = self.convert_budget(amount, from, to).await?;
        let prompt = build_advice_prompt(destination, &conversion);

        debug!(destination, agent = Self::AGENT_TYPE, "Requesting currency advice");

        let answer = self.generator.generate(INSTRUCTIONS, &prompt).await?;
        Ok(answer.unwrap_or_else(|| FALLBACK_ADVICE.to_string()))
    }
}

fn build_advice_prompt(destination: &str, conversion: &CurrencyConversion) -> String {
    format!(
        "Provide currency advice for a traveler going to {destination}:\n\
         \n\
         Budget: {summary}\n\
         \n\
         Please advise on:\n\
         1. Current exchange rate and what it means for their budget\n\
         2. Best practices for currency exchange (before travel vs. at destination)\n\
         3. Typical costs in {destination} to help them understand their spending power\n\
         4. Any currency-related tips or warnings for {destination}",
        destination = destination,
        summary = conversion.summary(),
    )
}
