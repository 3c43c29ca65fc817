//! Submitted travel plans tracked across their background run

mod entity;
mod error;
pub mod repository;

pub use entity::{PlanTask, TaskId, TaskStatus};
pub use error::TaskError;
pub use repository::{task_change, PlanTaskRepository, TaskChange};
