//! A submitted travel plan and its lifecycle

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TaskError;
use crate::domain::travel::{TravelItinerary, TravelPlanRequest};
use crate::domain::workflow::WorkflowProgress;

const ID_PREFIX: &str = "trip-";

/// Identifier of a submitted plan, `trip-{uuid}` in lowercase hyphenated form.
///
/// Doubles as the workflow task id of the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(format!("{}{}", ID_PREFIX, Uuid::new_v4().hyphenated()))
    }

    pub fn parse(raw: &str) -> Result<Self, TaskError> {
        let canonical = raw
            .strip_prefix(ID_PREFIX)
            .and_then(|suffix| Uuid::try_parse(suffix).ok().map(|uuid| (suffix, uuid)))
            .is_some_and(|(suffix, uuid)| uuid.hyphenated().to_string() == suffix);

        if canonical {
            Ok(Self(raw.to_string()))
        } else {
            Err(TaskError::InvalidId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a submitted plan is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Pending runs may start or be cancelled; running ones may finish any way
    pub fn allows(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Pending | Self::Running, Self::Cancelled)
                | (Self::Running, Self::Completed | Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One travel plan request tracked from submission to its final itinerary
#[derive(Debug, Clone)]
pub struct PlanTask {
    id: TaskId,
    request: TravelPlanRequest,
    status: TaskStatus,
    progress: Option<WorkflowProgress>,
    itinerary: Option<TravelItinerary>,
    failure: Option<String>,
    submitted_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl PlanTask {
    pub fn submit(request: TravelPlanRequest) -> Self {
        Self {
            id: TaskId::generate(),
            request,
            status: TaskStatus::Pending,
            progress: None,
            itinerary: None,
            failure: None,
            submitted_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn request(&self) -> &TravelPlanRequest {
        &self.request
    }

    pub fn destination(&self) -> &str {
        self.request.destination()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn progress(&self) -> Option<&WorkflowProgress> {
        self.progress.as_ref()
    }

    pub fn itinerary(&self) -> Option<&TravelItinerary> {
        self.itinerary.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn start(&mut self) -> Result<(), TaskError> {
        self.move_to(TaskStatus::Running)
    }

    /// Keep the latest notification. Returns false when it was dropped because
    /// the run already finished or the percentage went backwards.
    pub fn report(&mut self, progress: WorkflowProgress) -> bool {
        let regressed = self
            .progress
            .as_ref()
            .is_some_and(|current| progress.percentage < current.percentage);

        if self.is_finished() || regressed {
            return false;
        }
        self.progress = Some(progress);
        true
    }

    pub fn complete(&mut self, itinerary: TravelItinerary) -> Result<(), TaskError> {
        self.move_to(TaskStatus::Completed)?;
        self.itinerary = Some(itinerary);
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), TaskError> {
        self.move_to(TaskStatus::Failed)?;
        self.failure = Some(reason.into());
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), TaskError> {
        self.move_to(TaskStatus::Cancelled)
    }

    fn move_to(&mut self, next: TaskStatus) -> Result<(), TaskError> {
        if !self.status.allows(next) {
            return Err(TaskError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        let now = Utc::now();
        if next == TaskStatus::Running {
            self.started_at = Some(now);
        } else {
            self.finished_at = Some(now);
        }
        self.status = next;
        Ok(())
    }
}
