//! Versioned API endpoints

pub mod travel_plans;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/travel-plans", post(travel_plans::submit_travel_plan))
        .route(
            "/travel-plans/{task_id}",
            get(travel_plans::get_travel_plan).delete(travel_plans::cancel_travel_plan),
        )
}
