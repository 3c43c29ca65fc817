//! In-memory plan task store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::error::DomainError;
use crate::domain::plan_task::{PlanTask, PlanTaskRepository, TaskChange, TaskError, TaskId};

/// Keeps every task in a map guarded by a single lock; nothing survives a restart
#[derive(Debug, Default)]
pub struct InMemoryPlanTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, PlanTask>>>,
}

impl InMemoryPlanTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanTaskRepository for InMemoryPlanTaskRepository {
    async fn find(&self, id: &TaskId) -> Result<Option<PlanTask>, DomainError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn insert(&self, task: PlanTask) -> Result<(), DomainError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(task.id()) {
            return Err(TaskError::Duplicate(task.id().to_string()).into());
        }
        tasks.insert(task.id().clone(), task);
        Ok(())
    }

    async fn modify(&self, id: &TaskId, change: TaskChange) -> Result<PlanTask, DomainError> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("Travel plan '{}'", id)))?;

        let mut updated = stored.clone();
        change(&mut updated)?;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn purge_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();

        tasks.retain(|_, task| !task.finished_at().is_some_and(|at| at < cutoff));

        Ok((before - tasks.len()) as u64)
    }
}
