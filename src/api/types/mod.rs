//! Request and response types for the HTTP API

pub mod error;
pub mod json;
pub mod travel_plan;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use travel_plan::{
    ProgressResponse, TravelPlanAccepted, TravelPlanResponse, TravelPlanSubmission,
};
