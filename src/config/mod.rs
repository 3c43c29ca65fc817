//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CurrencyConfig, LlmConfig, LlmProviderKind, LogFormat, LoggingConfig,
    MetricsConfig, PlanStoreConfig, ServerConfig, WeatherConfig,
};
