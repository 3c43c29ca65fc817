//! Travel plan API types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{PlanTask, TravelItinerary, TravelPlanRequest, WorkflowProgress};

/// Body of `POST /v1/travel-plans`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanSubmission {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: Decimal,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl From<TravelPlanSubmission> for TravelPlanRequest {
    fn from(body: TravelPlanSubmission) -> Self {
        let mut request =
            TravelPlanRequest::new(body.destination, body.start_date, body.end_date, body.budget)
                .with_interests(body.interests);

        if let Some(style) = body.travel_style {
            request = request.with_travel_style(style);
        }
        if let Some(special) = body.special_requests {
            request = request.with_special_requests(special);
        }

        request
    }
}

/// Response when a plan is queued (HTTP 202)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanAccepted {
    pub task_id: String,
    pub status: String,
    pub message: String,
}

impl TravelPlanAccepted {
    pub fn pending(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: "pending".to_string(),
            message: "Travel plan queued for processing".to_string(),
        }
    }
}

/// Latest progress of a run
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub percentage: u8,
    pub step: String,
}

impl From<&WorkflowProgress> for ProgressResponse {
    fn from(progress: &WorkflowProgress) -> Self {
        Self {
            percentage: progress.percentage,
            step: progress.display_step(),
        }
    }
}

/// Status of one travel plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlanResponse {
    pub task_id: String,
    pub status: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<TravelItinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<&PlanTask> for TravelPlanResponse {
    fn from(task: &PlanTask) -> Self {
        Self {
            task_id: task.id().to_string(),
            status: task.status().to_string(),
            destination: task.destination().to_string(),
            progress: task.progress().map(ProgressResponse::from),
            itinerary: task.itinerary().cloned(),
            error: task.failure().map(String::from),
            created_at: task.submitted_at().to_rfc3339(),
            started_at: task.started_at().map(|t| t.to_rfc3339()),
            completed_at: task.finished_at().map(|t| t.to_rfc3339()),
        }
    }
}
