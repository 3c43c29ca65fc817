use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::domain::{DomainError, LlmProvider, LlmRequest, TextGenerator};
use crate::infrastructure::metrics::{record_llm_request, LlmRequestMetricParams};

/// Adapts a chat-completion provider to single-shot text generation.
///
/// Instructions go out as the system message, the prompt as the user message.
#[derive(Debug, Clone)]
pub struct LlmTextGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmTextGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    async fn generate(
        &self,
        instructions: &str,
        prompt: &str,
    ) -> Result<Option<String>, DomainError> {
        let mut builder = LlmRequest::builder().system(instructions).user(prompt);
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let started = Instant::now();
        let result = self.provider.chat(&self.model, builder.build()).await;
        let usage = result.as_ref().ok().and_then(|r| r.usage.clone());

        record_llm_request(LlmRequestMetricParams {
            provider: self.provider.provider_name(),
            model: &self.model,
            duration: started.elapsed(),
            success: result.is_ok(),
            input_tokens: usage.as_ref().map(|u| u.prompt_tokens as u64),
            output_tokens: usage.as_ref().map(|u| u.completion_tokens as u64),
        });

        match result {
            Ok(response) => {
                let answer = response.content().map(str::to_string);
                debug!(
                    provider = self.provider.provider_name(),
                    model = %self.model,
                    has_answer = answer.is_some(),
                    "Text generation completed"
                );
                Ok(answer)
            }
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    model = %self.model,
                    error = %e,
                    "Text generation failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{LlmResponse, Message, MessageRole};

    fn response(content: &str) -> LlmResponse {
        LlmResponse::new(
            "chatcmpl-1".to_string(),
            "gpt-4o".to_string(),
            Message::assistant(content),
        )
    }

    #[tokio::test]
    async fn test_sends_instructions_as_system_message() {
        let provider = Arc::new(MockLlmProvider::new("openai").with_response(response("Bonjour")));
        let generator = LlmTextGenerator::new(provider.clone(), "gpt-4o")
            .with_temperature(0.7)
            .with_max_tokens(4000);

        let answer = generator
            .generate("You are a local knowledge expert.", "Tips for Paris")
            .await
            .unwrap();

        assert_eq!(answer.as_deref(), Some("Bonjour"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, MessageRole::System);
        assert_eq!(
            requests[0].messages[0].content_text(),
            "You are a local knowledge expert."
        );
        assert_eq!(requests[0].messages[1].content_text(), "Tips for Paris");
        assert_eq!(requests[0].max_tokens, Some(4000));
    }

    #[tokio::test]
    async fn test_blank_answer_is_none() {
        let provider = Arc::new(MockLlmProvider::new("openai").with_response(response("  ")));
        let generator = LlmTextGenerator::new(provider, "gpt-4o");

        assert_eq!(generator.generate("persona", "task").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new("openai").with_error("rate limited"));
        let generator = LlmTextGenerator::new(provider, "gpt-4o");

        let err = generator.generate("persona", "task").await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }
}
