use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Single-shot text generation used by the planning agents.
///
/// `instructions` carries the agent persona, `prompt` the task. `Ok(None)`
/// means the model returned no answer; callers substitute their own fallback
/// text rather than treating it as an error.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    async fn generate(
        &self,
        instructions: &str,
        prompt: &str,
    ) -> Result<Option<String>, DomainError>;
}
