//! Travel plan endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, TravelPlanAccepted, TravelPlanResponse, TravelPlanSubmission,
};
use crate::domain::TravelPlanRequest;

/// POST /v1/travel-plans
pub async fn submit_travel_plan(
    State(state): State<AppState>,
    Json(body): Json<TravelPlanSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let request = TravelPlanRequest::from(body);

    debug!(
        destination = request.destination(),
        days = request.trip_days(),
        "Submitting travel plan"
    );

    let task = state.travel_plans.submit(request).await?;
    info!(task_id = %task.id(), "Travel plan accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(TravelPlanAccepted::pending(task.id().as_str())),
    ))
}

/// GET /v1/travel-plans/:task_id
pub async fn get_travel_plan(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TravelPlanResponse>, ApiError> {
    match state.travel_plans.get(&task_id).await? {
        Some(task) => Ok(Json(TravelPlanResponse::from(&task))),
        None => Err(ApiError::not_found(format!(
            "Travel plan '{}' not found",
            task_id
        ))),
    }
}

/// DELETE /v1/travel-plans/:task_id
pub async fn cancel_travel_plan(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let task = state.travel_plans.cancel(&task_id).await?;

    Ok((StatusCode::OK, Json(TravelPlanResponse::from(&task))))
}
