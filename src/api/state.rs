//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::TravelPlanService;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub travel_plans: Arc<TravelPlanService>,
}

impl AppState {
    pub fn new(travel_plans: Arc<TravelPlanService>) -> Self {
        Self { travel_plans }
    }
}
