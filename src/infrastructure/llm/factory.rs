use std::sync::Arc;
use std::time::Duration;

use super::{AzureOpenAiConfig, AzureOpenAiProvider, OpenAiProvider};
use crate::config::{LlmConfig, LlmProviderKind};
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::http_client::HttpClient;

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the configured LLM provider
    pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            DomainError::configuration(format!(
                "No API key configured for LLM provider {:?}",
                config.provider
            ))
        })?;
        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

        match config.provider {
            LlmProviderKind::OpenAi => {
                let provider = match &config.base_url {
                    Some(base_url) => OpenAiProvider::with_base_url(http_client, api_key, base_url),
                    None => OpenAiProvider::new(http_client, api_key),
                };
                Ok(Arc::new(provider))
            }

            LlmProviderKind::AzureOpenAi => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    DomainError::configuration("Azure OpenAI requires llm.endpoint")
                })?;

                let azure_config = AzureOpenAiConfig::new(endpoint, api_key)
                    .with_api_version(&config.api_version);

                Ok(Arc::new(AzureOpenAiProvider::new(http_client, azure_config)))
            }
        }
    }
}
