use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub currency: CurrencyConfig,
    pub weather: WeatherConfig,
    pub plans: PlanStoreConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    #[default]
    #[serde(alias = "openai")]
    OpenAi,
    #[serde(alias = "azure", alias = "azure_openai")]
    AzureOpenAi,
}

/// Text generation backend used by the planning agents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    /// Model name, or deployment name for Azure OpenAI
    pub model: String,
    /// Overrides the OpenAI base URL
    pub base_url: Option<String>,
    /// Azure OpenAI resource endpoint
    pub endpoint: Option<String>,
    pub api_version: String,
    /// Falls back to `OPENAI_API_KEY` / `AZURE_OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Retention of submitted travel plans
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanStoreConfig {
    /// Finished plans older than this are removed
    pub retention_secs: u64,
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            model: "gpt-4o".to_string(),
            base_url: None,
            endpoint: None,
            api_version: "2024-02-01".to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 4000,
            timeout_secs: 120,
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.frankfurter.app".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "TravelPlanner/1.0 (travel-planner@example.com)".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for PlanStoreConfig {
    fn default() -> Self {
        Self {
            retention_secs: 3600,
            cleanup_interval_secs: 300,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl LlmConfig {
    /// Configured key, else the provider's conventional environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }

        let var = match self.provider {
            LlmProviderKind::OpenAi => "OPENAI_API_KEY",
            LlmProviderKind::AzureOpenAi => "AZURE_OPENAI_API_KEY",
        };
        std::env::var(var).ok().filter(|k| !k.is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.llm.provider, LlmProviderKind::OpenAi);
        assert_eq!(config.currency.base_url, "https://api.frankfurter.app");
        assert_eq!(config.weather.base_url, "https://api.weather.gov");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_sources_keep_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("server.port", 9090)
            .unwrap()
            .set_override("llm.provider", "azure_openai")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.provider, LlmProviderKind::AzureOpenAi);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.plans.retention_secs, 3600);
    }

    #[test]
    fn test_configured_api_key_wins() {
        let llm = LlmConfig {
            api_key: Some("sk-configured".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(llm.resolve_api_key().as_deref(), Some("sk-configured"));
    }
}
