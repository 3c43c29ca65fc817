//! Infrastructure services

mod travel_plan_service;

pub use travel_plan_service::TravelPlanService;
