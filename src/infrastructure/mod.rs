//! Infrastructure layer - External service implementations

pub mod agents;
pub mod currency;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod metrics;
pub mod plan_task;
pub mod services;
pub mod weather;
pub mod workflow;
