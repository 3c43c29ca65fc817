//! Background execution of travel planning runs

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::plan_task::{task_change, PlanTask, PlanTaskRepository, TaskId};
use crate::domain::{ChannelProgressSink, TravelPlanRequest, TravelPlanner};

/// Finished plans are kept this long unless configured otherwise
const DEFAULT_RETENTION: Duration = Duration::from_secs(3600);

/// Cancellation tokens of runs that have not finished yet
type RunRegistry = Arc<Mutex<HashMap<TaskId, CancellationToken>>>;

/// Accepts planning requests, runs each one on its own task and records its
/// progress and outcome. The plan id doubles as the workflow task id.
#[derive(Clone)]
pub struct TravelPlanService {
    planner: Arc<dyn TravelPlanner>,
    tasks: Arc<dyn PlanTaskRepository>,
    runs: RunRegistry,
    retention: Duration,
}

impl Debug for TravelPlanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelPlanService")
            .field("tasks", &self.tasks)
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

impl TravelPlanService {
    pub fn new(planner: Arc<dyn TravelPlanner>, tasks: Arc<dyn PlanTaskRepository>) -> Self {
        Self {
            planner,
            tasks,
            runs: Arc::new(Mutex::new(HashMap::new())),
            retention: DEFAULT_RETENTION,
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Validate, store a pending plan and start its run
    #[instrument(skip(self, request), fields(destination = request.destination()))]
    pub async fn submit(&self, request: TravelPlanRequest) -> Result<PlanTask, DomainError> {
        request.validate()?;

        let task = PlanTask::submit(request.clone());
        self.tasks.insert(task.clone()).await?;

        let id = task.id().clone();
        let cancel = CancellationToken::new();
        self.runs.lock().await.insert(id.clone(), cancel.clone());

        info!(task_id = %id, "Queued travel plan");
        tokio::spawn(self.clone().run(id, request, cancel));

        Ok(task)
    }

    pub async fn get(&self, id: &str) -> Result<Option<PlanTask>, DomainError> {
        let id = TaskId::parse(id)?;
        self.tasks.find(&id).await
    }

    /// Mark the plan cancelled and stop its run if one is still going
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> Result<PlanTask, DomainError> {
        let id = TaskId::parse(id)?;
        let task = self.tasks.modify(&id, task_change(|task| task.cancel())).await?;

        if let Some(token) = self.runs.lock().await.remove(&id) {
            token.cancel();
            debug!(task_id = %id, "Signalled running workflow to stop");
        }

        info!(task_id = %id, "Travel plan cancelled by request");
        Ok(task)
    }

    /// Drop finished plans older than the retention window
    pub async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let retention = chrono::Duration::from_std(self.retention)
            .map_err(|e| DomainError::configuration(format!("Invalid retention: {}", e)))?;

        self.tasks.purge_finished_before(Utc::now() - retention).await
    }

    pub async fn active_runs(&self) -> usize {
        self.runs.lock().await.len()
    }

    async fn run(self, id: TaskId, request: TravelPlanRequest, cancel: CancellationToken) {
        // A plan cancelled before it started has nothing to run
        if let Err(e) = self.tasks.modify(&id, task_change(|task| task.start())).await {
            debug!(task_id = %id, error = %e, "Travel plan not started");
            self.runs.lock().await.remove(&id);
            return;
        }

        let (sink, mut receiver) = ChannelProgressSink::channel();
        let forwarder = {
            let tasks = self.tasks.clone();
            let id = id.clone();
            tokio::spawn(async move {
                while let Some(progress) = receiver.recv().await {
                    let report = task_change(move |task| {
                        task.report(progress);
                        Ok(())
                    });
                    if let Err(e) = tasks.modify(&id, report).await {
                        debug!(task_id = %id, error = %e, "Dropped progress update");
                    }
                }
            })
        };

        let result = self
            .planner
            .execute(&request, id.as_str(), &sink, &cancel)
            .await;

        // Every progress update lands before the final status
        drop(sink);
        if let Err(e) = forwarder.await {
            warn!(task_id = %id, error = %e, "Progress forwarder stopped");
        }
        self.runs.lock().await.remove(&id);

        let outcome = match result {
            Ok(itinerary) => {
                self.tasks
                    .modify(&id, task_change(move |task| task.complete(itinerary)))
                    .await
            }
            Err(e) if e.is_cancelled() => {
                self.tasks
                    .modify(&id, task_change(|task| task.cancel()))
                    .await
            }
            Err(e) => {
                let reason = e.to_string();
                self.tasks
                    .modify(&id, task_change(move |task| task.fail(reason)))
                    .await
            }
        };

        match outcome {
            Ok(task) => info!(task_id = %id, status = %task.status(), "Travel plan finished"),
            Err(e) if e.is_validation() => {
                // Cancelled through the API while the run was winding down
                debug!(task_id = %id, error = %e, "Travel plan already finished");
            }
            Err(e) => error!(task_id = %id, error = %e, "Failed to record travel plan outcome"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::domain::plan_task::TaskStatus;
    use crate::domain::travel::EmergencyInfo;
    use crate::domain::{
        BudgetBreakdown, ProgressSink, TravelItinerary, TravelStyle, WorkflowError,
        WorkflowProgress, WorkflowStage,
    };
    use crate::infrastructure::plan_task::InMemoryPlanTaskRepository;

    #[derive(Debug, Clone, Copy)]
    enum Script {
        Succeed,
        Fail,
        WaitForCancel,
    }

    /// Planner that reports a few progress steps and then follows its script
    #[derive(Debug)]
    struct ScriptedPlanner(Script);

    #[async_trait]
    impl TravelPlanner for ScriptedPlanner {
        async fn execute(
            &self,
            request: &TravelPlanRequest,
            task_id: &str,
            progress: &dyn ProgressSink,
            cancel: &CancellationToken,
        ) -> Result<TravelItinerary, WorkflowError> {
            progress.report(WorkflowProgress::new(10, "Gathering destination information..."));

            match self.0 {
                Script::Succeed => {
                    progress.report(WorkflowProgress::new(100, "Travel plan complete!"));
                    Ok(TravelItinerary {
                        task_id: task_id.to_string(),
                        destination: request.destination().to_string(),
                        start_date: request.start_date(),
                        end_date: request.end_date(),
                        daily_plans: vec![],
                        budget: BudgetBreakdown::allocate(request.budget(), TravelStyle::Moderate),
                        travel_tips: vec![],
                        packing_list: vec![],
                        emergency_info: EmergencyInfo::for_destination(request.destination()),
                    })
                }
                Script::Fail => Err(WorkflowError::step_failed(
                    "ItineraryPlanning",
                    WorkflowStage::Itinerary,
                    DomainError::provider("openai", "HTTP 500"),
                )),
                Script::WaitForCancel => {
                    cancel.cancelled().await;
                    Err(WorkflowError::cancelled(WorkflowStage::Gathering))
                }
            }
        }
    }

    fn service(script: Script) -> TravelPlanService {
        TravelPlanService::new(
            Arc::new(ScriptedPlanner(script)),
            Arc::new(InMemoryPlanTaskRepository::new()),
        )
    }

    fn request() -> TravelPlanRequest {
        TravelPlanRequest::new(
            "Paris, France",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            dec!(2000),
        )
    }

    async fn wait_until<F>(service: &TravelPlanService, id: &str, done: F) -> PlanTask
    where
        F: Fn(&PlanTask) -> bool,
    {
        for _ in 0..200 {
            let task = service.get(id).await.unwrap().unwrap();
            if done(&task) {
                return task;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("travel plan {} did not reach the expected state", id);
    }

    #[tokio::test]
    async fn test_submit_runs_to_completion() {
        let service = service(Script::Succeed);

        let task = service.submit(request()).await.unwrap();
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.destination(), "Paris, France");

        let id = task.id().to_string();
        let finished = wait_until(&service, &id, PlanTask::is_finished).await;

        assert_eq!(finished.status(), TaskStatus::Completed);
        assert_eq!(finished.progress().unwrap().percentage, 100);
        let itinerary = finished.itinerary().unwrap();
        assert_eq!(itinerary.task_id, id);
        assert_eq!(itinerary.budget.accommodation, dec!(700));
        assert_eq!(service.active_runs().await, 0);
    }

    #[tokio::test]
    async fn test_failed_run_records_error() {
        let service = service(Script::Fail);

        let task = service.submit(request()).await.unwrap();
        let finished = wait_until(&service, task.id().as_str(), PlanTask::is_finished).await;

        assert_eq!(finished.status(), TaskStatus::Failed);
        assert!(finished.failure().unwrap().contains("ItineraryPlanning"));
        assert_eq!(finished.progress().unwrap().percentage, 10);
        assert!(finished.itinerary().is_none());
    }

    #[tokio::test]
    async fn test_cancel_running_plan() {
        let service = service(Script::WaitForCancel);

        let task = service.submit(request()).await.unwrap();
        let id = task.id().to_string();
        wait_until(&service, &id, |task| task.progress().is_some()).await;

        let cancelled = service.cancel(&id).await.unwrap();
        assert_eq!(cancelled.status(), TaskStatus::Cancelled);

        for _ in 0..200 {
            if service.active_runs().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(service.active_runs().await, 0);
        let stored = service.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), TaskStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_completed_plan_is_rejected() {
        let service = service(Script::Succeed);

        let task = service.submit(request()).await.unwrap();
        let id = task.id().to_string();
        wait_until(&service, &id, PlanTask::is_finished).await;

        let err = service.cancel(&id).await.unwrap_err();
        assert!(err.is_validation());
        let stored = service.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_invalid_request_creates_nothing() {
        let service = service(Script::Succeed);
        let request = TravelPlanRequest::new(
            "",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            dec!(2000),
        );

        let err = service.submit(request).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.active_runs().await, 0);
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let service = service(Script::Succeed);

        let err = service.get("trip-12345678-1234-1234-1234-123456789ABC").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { .. }));
        assert!(service.get(TaskId::generate().as_str()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_respects_retention() {
        let kept = service(Script::Succeed);
        let task = kept.submit(request()).await.unwrap();
        wait_until(&kept, task.id().as_str(), PlanTask::is_finished).await;
        assert_eq!(kept.cleanup_expired().await.unwrap(), 0);

        let expiring = service(Script::Succeed).with_retention(Duration::ZERO);
        let task = expiring.submit(request()).await.unwrap();
        wait_until(&expiring, task.id().as_str(), PlanTask::is_finished).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(expiring.cleanup_expired().await.unwrap(), 1);
        assert!(expiring.get(task.id().as_str()).await.unwrap().is_none());
    }
}
