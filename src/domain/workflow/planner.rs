use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{ProgressSink, WorkflowError};
use crate::domain::travel::{TravelItinerary, TravelPlanRequest};

/// Runs one planning workflow for a request.
///
/// Progress notifications are non-decreasing and end at 100 on success. The
/// call returns either a complete itinerary or the failure that aborted the
/// run; a cancelled run yields [`WorkflowError::Cancelled`].
#[async_trait]
pub trait TravelPlanner: Send + Sync {
    async fn execute(
        &self,
        request: &TravelPlanRequest,
        task_id: &str,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<TravelItinerary, WorkflowError>;
}
