use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage,
};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI API provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

/// Chat-completions body shared by the OpenAI-compatible providers
pub(super) fn build_chat_body(model: Option<&str>, request: &LlmRequest) -> serde_json::Value {
    let messages: Vec<OpenAiMessage> = request
        .messages
        .iter()
        .map(OpenAiMessage::from_domain)
        .collect();

    let mut body = serde_json::json!({
        "messages": messages,
        "stream": false,
    });

    if let Some(model) = model {
        body["model"] = serde_json::json!(model);
    }

    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }

    if let Some(top_p) = request.top_p {
        body["top_p"] = serde_json::json!(top_p);
    }

    body
}

/// Parse a chat-completions response body
pub(super) fn parse_chat_response(
    provider: &'static str,
    json: serde_json::Value,
) -> Result<LlmResponse, DomainError> {
    let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
        DomainError::provider(provider, format!("Failed to parse response: {}", e))
    })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::provider(provider, "No choices in response"))?;

    let message = Message::assistant(choice.message.content.unwrap_or_default());

    let mut llm_response = LlmResponse::new(response.id, response.model, message);

    if let Some(reason) = choice.finish_reason {
        llm_response = llm_response.with_finish_reason(FinishReason::parse(&reason));
    }

    if let Some(usage) = response.usage {
        llm_response =
            llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
    }

    Ok(llm_response)
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = build_chat_body(Some(model), &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        parse_chat_response(self.provider_name(), response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

impl OpenAiMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role,
            content: message.content_text().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    #[tokio::test]
    async fn test_openai_chat() {
        let mock_response = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Day 1: Louvre in the morning, Seine cruise at dusk."
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);

        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = LlmRequest::builder()
            .system("You are an expert travel itinerary planner.")
            .user("Plan a day in Paris")
            .build();

        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.model, "gpt-4o");
        assert_eq!(
            response.content(),
            Some("Day 1: Louvre in the morning, Seine cruise at dusk.")
        );
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 8);
    }

    #[tokio::test]
    async fn test_openai_null_content_is_no_answer() {
        let mock_response = serde_json::json!({
            "id": "chatcmpl-empty",
            "model": "gpt-4o",
            "choices": [{
                "message": { "role": "assistant", "content": null },
                "finish_reason": "content_filter"
            }]
        });

        let client = MockHttpClient::new().with_response(TEST_URL, mock_response);
        let provider = OpenAiProvider::new(client, "test-api-key");

        let response = provider
            .chat("gpt-4o", LlmRequest::builder().user("Hi").build())
            .await
            .unwrap();

        assert_eq!(response.content(), None);
        assert_eq!(response.finish_reason, Some(FinishReason::ContentFilter));
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");

        let provider = OpenAiProvider::new(client, "invalid-key");

        let request = LlmRequest::builder().user("Hello!").build();

        let result = provider.chat("gpt-4o", request).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let mock_response = serde_json::json!({
            "id": "chatcmpl-custom",
            "model": "gpt-4o",
            "choices": [{
                "message": { "role": "assistant", "content": "Custom response" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
        });

        let client = MockHttpClient::new().with_response(custom_url, mock_response);
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080/");

        let request = LlmRequest::builder().user("Test").build();
        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert_eq!(response.id, "chatcmpl-custom");
    }

    #[test]
    fn test_build_chat_body() {
        let request = LlmRequest::builder()
            .system("persona")
            .user("task")
            .temperature(0.7)
            .max_tokens(2000)
            .build();

        let body = build_chat_body(Some("gpt-4o"), &request);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "task");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["stream"], false);

        let without_model = build_chat_body(None, &request);
        assert!(without_model.get("model").is_none());
    }
}
