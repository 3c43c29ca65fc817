//! Travel planning workflow implementation

mod assembly;
mod travel_planning;

pub use assembly::{BASE_PACKING_ITEMS, GENERAL_TIPS};
pub use travel_planning::TravelPlanningWorkflow;
