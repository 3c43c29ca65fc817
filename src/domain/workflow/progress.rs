//! Progress notifications emitted by a planning run

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Immutable progress notification. Emitted, never stored by the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowProgress {
    pub percentage: u8,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}

impl WorkflowProgress {
    pub fn new(percentage: u8, step: impl Into<String>) -> Self {
        Self {
            percentage: percentage.min(100),
            step: step.into(),
            agent_name: None,
        }
    }

    pub fn with_agent(mut self, agent_name: impl Into<String>) -> Self {
        self.agent_name = Some(agent_name.into());
        self
    }

    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }

    /// Step label prefixed with the agent, e.g. `[WeatherAdvisor] Fetching...`
    pub fn display_step(&self) -> String {
        match &self.agent_name {
            Some(agent) => format!("[{}] {}", agent, self.step),
            None => self.step.clone(),
        }
    }
}

impl fmt::Display for WorkflowProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}% {}", self.percentage, self.display_step())
    }
}

/// Observer receiving progress notifications.
///
/// Reporting must not block the run.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: WorkflowProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(WorkflowProgress) + Send + Sync,
{
    fn report(&self, progress: WorkflowProgress) {
        self(progress)
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn report(&self, _progress: WorkflowProgress) {}
}

/// Forwards notifications over an unbounded channel drained by the caller.
/// A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    sender: mpsc::UnboundedSender<WorkflowProgress>,
}

impl ChannelProgressSink {
    pub fn new(sender: mpsc::UnboundedSender<WorkflowProgress>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WorkflowProgress>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, progress: WorkflowProgress) {
        let _ = self.sender.send(progress);
    }
}
