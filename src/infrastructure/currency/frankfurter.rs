//! Frankfurter (ECB reference rates) currency client

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{CurrencyConversion, CurrencyService, DomainError};
use crate::infrastructure::http_client::{HttpClient, HttpClientTrait};

const DEFAULT_FRANKFURTER_BASE_URL: &str = "https://api.frankfurter.app";

/// Currency lookup backed by the Frankfurter API. No API key required.
///
/// Never fails: transport errors, unparseable bodies and missing rates all
/// degrade to an identity conversion dated today.
#[derive(Debug)]
pub struct FrankfurterCurrencyService<C: HttpClientTrait = HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> FrankfurterCurrencyService<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_FRANKFURTER_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }

    async fn fetch(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<Option<CurrencyConversion>, DomainError> {
        let query = vec![
            ("amount", amount.to_string()),
            ("from", from.to_string()),
            ("to", to.to_string()),
        ];
        let body = self
            .client
            .get_json(&self.latest_url(), vec![("Accept", "application/json")], query)
            .await?;

        let response: FrankfurterResponse = serde_json::from_value(body).map_err(|e| {
            DomainError::provider("frankfurter", format!("Failed to parse response: {}", e))
        })?;

        Ok(response.rates.get(to).map(|converted| {
            let date = response.date.unwrap_or_else(|| Utc::now().date_naive());
            CurrencyConversion::quoted(amount, from, *converted, to, date)
        }))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CurrencyService for FrankfurterCurrencyService<C> {
    async fn convert_amount(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<CurrencyConversion, DomainError> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        let today = Utc::now().date_naive();

        if from == to {
            return Ok(CurrencyConversion::identity(amount, from, to, today));
        }

        info!(%amount, from = %from, to = %to, "Converting currency");

        match self.fetch(amount, &from, &to).await {
            Ok(Some(conversion)) => {
                info!(summary = %conversion.summary(), "Currency conversion succeeded");
                Ok(conversion)
            }
            Ok(None) => {
                warn!(from = %from, to = %to, "No exchange rate found, using 1:1");
                Ok(CurrencyConversion::identity(amount, from, to, today))
            }
            Err(e) => {
                warn!(from = %from, to = %to, error = %e, "Currency lookup failed, using 1:1");
                Ok(CurrencyConversion::identity(amount, from, to, today))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}
