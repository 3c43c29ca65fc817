//! Travel planning workflow domain module
//!
//! A run moves through `Init → Gathering → Itinerary → Budget → Assembly →
//! Done`. The gathering phase fans out to three independent gatherers whose
//! failures are tolerated; any failure after it aborts the run.

mod error;
mod outcome;
mod planner;
mod progress;
mod state;

pub use error::WorkflowError;
pub use outcome::GathererOutcome;
pub use planner::TravelPlanner;
pub use progress::{ChannelProgressSink, NoopProgressSink, ProgressSink, WorkflowProgress};
pub use state::{steps, WorkflowStage, WorkflowState};

#[cfg(test)]
pub use progress::mock::RecordingProgressSink;
