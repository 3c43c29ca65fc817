//! Plan task errors

use thiserror::Error;

use super::entity::TaskStatus;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid travel plan id '{0}': expected trip-{{uuid}}")]
    InvalidId(String),

    #[error("Travel plan is {from} and cannot become {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    #[error("Travel plan '{0}' already exists")]
    Duplicate(String),
}

impl From<TaskError> for DomainError {
    fn from(error: TaskError) -> Self {
        match error {
            TaskError::InvalidId(_) => DomainError::invalid_id(error.to_string()),
            TaskError::InvalidTransition { .. } => DomainError::validation(error.to_string()),
            TaskError::Duplicate(_) => DomainError::conflict(error.to_string()),
        }
    }
}
