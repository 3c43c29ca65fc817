//! Currency conversion model and lookup capability

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Result of converting an amount between two currencies.
///
/// `exchange_rate == converted_amount / original_amount` whenever the original
/// amount is positive. The identity fallback has a rate of exactly 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConversion {
    pub original_amount: Decimal,
    pub original_currency: String,
    pub converted_amount: Decimal,
    pub target_currency: String,
    pub exchange_rate: Decimal,
    pub rate_date: NaiveDate,
}

impl CurrencyConversion {
    /// Conversion from a provider quote; the rate is derived from the amounts
    pub fn quoted(
        original_amount: Decimal,
        original_currency: impl Into<String>,
        converted_amount: Decimal,
        target_currency: impl Into<String>,
        rate_date: NaiveDate,
    ) -> Self {
        let exchange_rate = if original_amount > Decimal::ZERO {
            converted_amount / original_amount
        } else {
            Decimal::ONE
        };

        Self {
            original_amount,
            original_currency: original_currency.into(),
            converted_amount,
            target_currency: target_currency.into(),
            exchange_rate,
            rate_date,
        }
    }

    /// Fallback used when no rate could be obtained
    pub fn identity(
        amount: Decimal,
        original_currency: impl Into<String>,
        target_currency: impl Into<String>,
        rate_date: NaiveDate,
    ) -> Self {
        Self {
            original_amount: amount,
            original_currency: original_currency.into(),
            converted_amount: amount,
            target_currency: target_currency.into(),
            exchange_rate: Decimal::ONE,
            rate_date,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.exchange_rate == Decimal::ONE && self.converted_amount == self.original_amount
    }

    /// One-line human summary, e.g.
    /// `3,000.00 USD = 2,760.00 EUR (Rate: 0.9200 as of 2025-06-01)`
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {} {} (Rate: {} as of {})",
            format_amount(self.original_amount),
            self.original_currency,
            format_amount(self.converted_amount),
            self.target_currency,
            round(self.exchange_rate, 4),
            self.rate_date.format("%Y-%m-%d"),
        )
    }
}

fn round(value: Decimal, dp: u32) -> String {
    format!(
        "{:.*}",
        dp as usize,
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Two decimals with thousands separators
fn format_amount(value: Decimal) -> String {
    format_grouped(value, 2)
}

/// `dp` decimals with thousands separators, e.g. `1,234.50`
pub(crate) fn format_grouped(value: Decimal, dp: u32) -> String {
    let fixed = round(value.abs(), dp);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if value.is_sign_negative() && !value.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Currency-rate lookup.
///
/// Production implementations degrade to [`CurrencyConversion::identity`] on
/// transport or data errors; an `Err` is reserved for failures the caller is
/// expected to tolerate.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CurrencyService: Send + Sync + Debug {
    async fn convert_amount(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<CurrencyConversion, DomainError>;

    /// Rate for one unit of `from`
    async fn exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, DomainError> {
        Ok(self.convert_amount(Decimal::ONE, from, to).await?.exchange_rate)
    }
}
