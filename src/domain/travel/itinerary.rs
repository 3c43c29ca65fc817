//! Final travel plan artifact

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BudgetBreakdown;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub location: String,
    pub description: String,
    pub estimated_cost: Decimal,
}

impl Activity {
    pub fn new(location: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            description: description.into(),
            estimated_cost: Decimal::ZERO,
        }
    }

    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.estimated_cost = cost;
        self
    }
}

/// One day of the trip with up to four activity slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day_number: u32,
    pub date: NaiveDate,
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Activity>,
}

impl DayPlan {
    pub fn new(day_number: u32, date: NaiveDate, theme: impl Into<String>) -> Self {
        Self {
            day_number,
            date,
            theme: theme.into(),
            morning: None,
            lunch: None,
            afternoon: None,
            dinner: None,
        }
    }

    pub fn with_morning(mut self, activity: Activity) -> Self {
        self.morning = Some(activity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyInfo {
    pub local_emergency_number: String,
    pub nearest_embassy: String,
    pub healthcare_info: String,
}

impl EmergencyInfo {
    pub fn for_destination(destination: &str) -> Self {
        Self {
            local_emergency_number: "112 (EU) or 911 (US/Canada)".to_string(),
            nearest_embassy: format!("Contact your embassy in {}", destination),
            healthcare_info: "Travel with comprehensive health insurance.".to_string(),
        }
    }
}

/// Complete plan returned by a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelItinerary {
    pub task_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_plans: Vec<DayPlan>,
    pub budget: BudgetBreakdown,
    pub travel_tips: Vec<String>,
    pub packing_list: Vec<String>,
    pub emergency_info: EmergencyInfo,
}
