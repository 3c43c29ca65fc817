//! Deterministic budget allocation

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TravelStyle;

/// Share of the total budget given to each spending category.
///
/// Every table sums to exactly 1.00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationTable {
    pub accommodation: Decimal,
    pub food: Decimal,
    pub activities: Decimal,
    pub transportation: Decimal,
    pub shopping: Decimal,
    pub emergency: Decimal,
}

pub const LUXURY_ALLOCATION: AllocationTable = AllocationTable {
    accommodation: dec!(0.40),
    food: dec!(0.25),
    activities: dec!(0.20),
    transportation: dec!(0.08),
    shopping: dec!(0.05),
    emergency: dec!(0.02),
};

pub const BUDGET_ALLOCATION: AllocationTable = AllocationTable {
    accommodation: dec!(0.25),
    food: dec!(0.30),
    activities: dec!(0.25),
    transportation: dec!(0.10),
    shopping: dec!(0.05),
    emergency: dec!(0.05),
};

pub const MODERATE_ALLOCATION: AllocationTable = AllocationTable {
    accommodation: dec!(0.35),
    food: dec!(0.25),
    activities: dec!(0.20),
    transportation: dec!(0.10),
    shopping: dec!(0.05),
    emergency: dec!(0.05),
};

impl AllocationTable {
    pub fn for_style(style: TravelStyle) -> &'static AllocationTable {
        match style {
            TravelStyle::Luxury => &LUXURY_ALLOCATION,
            TravelStyle::Budget => &BUDGET_ALLOCATION,
            TravelStyle::Moderate => &MODERATE_ALLOCATION,
        }
    }

    pub fn total(&self) -> Decimal {
        self.accommodation
            + self.food
            + self.activities
            + self.transportation
            + self.shopping
            + self.emergency
    }
}

/// Budget split across the six spending categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub total_budget: Decimal,
    pub accommodation: Decimal,
    pub food: Decimal,
    pub activities: Decimal,
    pub transportation: Decimal,
    pub shopping: Decimal,
    pub emergency: Decimal,
}

impl BudgetBreakdown {
    /// Allocate `total` using the table for `style`. Exact decimal products,
    /// no rounding.
    pub fn allocate(total: Decimal, style: TravelStyle) -> Self {
        let table = AllocationTable::for_style(style);

        Self {
            total_budget: total,
            accommodation: total * table.accommodation,
            food: total * table.food,
            activities: total * table.activities,
            transportation: total * table.transportation,
            shopping: total * table.shopping,
            emergency: total * table.emergency,
        }
    }

    pub fn allocated_total(&self) -> Decimal {
        self.accommodation
            + self.food
            + self.activities
            + self.transportation
            + self.shopping
            + self.emergency
    }

    /// Even per-day spend; zero for a zero-day trip
    pub fn daily_budget(&self, days: u32) -> Decimal {
        if days == 0 {
            return Decimal::ZERO;
        }
        self.total_budget / Decimal::from(days)
    }
}
