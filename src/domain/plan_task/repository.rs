//! Plan task storage

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{PlanTask, TaskError, TaskId};
use crate::domain::error::DomainError;

/// A state change applied to a stored task. Returning an error leaves the
/// stored task untouched.
pub type TaskChange = Box<dyn FnOnce(&mut PlanTask) -> Result<(), TaskError> + Send>;

pub fn task_change<F>(change: F) -> TaskChange
where
    F: FnOnce(&mut PlanTask) -> Result<(), TaskError> + Send + 'static,
{
    Box::new(change)
}

#[async_trait]
pub trait PlanTaskRepository: Send + Sync + Debug {
    async fn find(&self, id: &TaskId) -> Result<Option<PlanTask>, DomainError>;

    /// Store a newly submitted task; an existing id is a conflict
    async fn insert(&self, task: PlanTask) -> Result<(), DomainError>;

    /// Apply `change` atomically with respect to other modifications and
    /// return the stored result
    async fn modify(&self, id: &TaskId, change: TaskChange) -> Result<PlanTask, DomainError>;

    /// Remove finished tasks whose run ended before `cutoff`
    async fn purge_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
