//! Workflow error types

use thiserror::Error;

use super::state::WorkflowStage;
use crate::domain::DomainError;

/// Errors that abort a planning run
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workflow cancelled during {stage} stage")]
    Cancelled { stage: WorkflowStage },

    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: &'static str,
        #[source]
        source: DomainError,
    },
}

impl WorkflowError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn cancelled(stage: WorkflowStage) -> Self {
        Self::Cancelled { stage }
    }

    /// Wrap a step failure; a cancelled collaborator call stays a cancellation
    pub fn step_failed(step: &'static str, stage: WorkflowStage, source: DomainError) -> Self {
        if source.is_cancelled() {
            Self::Cancelled { stage }
        } else {
            Self::StepFailed { step, source }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Label used for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid",
            Self::Cancelled { .. } => "cancelled",
            Self::StepFailed { .. } => "failed",
        }
    }
}

impl From<WorkflowError> for DomainError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::InvalidInput(message) => DomainError::validation(message),
            WorkflowError::Cancelled { .. } => DomainError::Cancelled,
            WorkflowError::StepFailed { source, .. } => source,
        }
    }
}
