//! Travel Planner
//!
//! Multi-agent travel itinerary planning:
//! - Concurrent gathering of currency, weather and local knowledge
//! - LLM-written itinerary and style-based budget allocation
//! - Background runs tracked per plan with live progress

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::{TextGenerator, TravelPlanner};
use infrastructure::{
    currency::FrankfurterCurrencyService,
    http_client::HttpClient,
    llm::{LlmProviderFactory, LlmTextGenerator},
    plan_task::InMemoryPlanTaskRepository,
    services::TravelPlanService,
    weather::NwsWeatherService,
    workflow::TravelPlanningWorkflow,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Create the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let planner = create_planner(config)?;

    let tasks = Arc::new(InMemoryPlanTaskRepository::new());
    let travel_plans = Arc::new(
        TravelPlanService::new(planner, tasks)
            .with_retention(Duration::from_secs(config.plans.retention_secs)),
    );
    info!(
        retention_secs = config.plans.retention_secs,
        "Travel plan service initialized"
    );

    Ok(AppState::new(travel_plans))
}

/// Wire the workflow to the configured LLM and the public currency and weather APIs
pub fn create_planner(config: &AppConfig) -> anyhow::Result<Arc<dyn TravelPlanner>> {
    let provider = LlmProviderFactory::from_config(&config.llm)?;
    info!(
        provider = provider.provider_name(),
        model = %config.llm.model,
        "LLM provider configured"
    );

    let generator: Arc<dyn TextGenerator> = Arc::new(
        LlmTextGenerator::new(provider, &config.llm.model)
            .with_temperature(config.llm.temperature)
            .with_max_tokens(config.llm.max_tokens),
    );

    let currency = FrankfurterCurrencyService::with_base_url(
        HttpClient::with_timeout(Duration::from_secs(config.currency.timeout_secs))?,
        &config.currency.base_url,
    );

    let weather = NwsWeatherService::with_base_url(
        HttpClient::with_timeout(Duration::from_secs(config.weather.timeout_secs))?,
        &config.weather.base_url,
    )
    .with_user_agent(&config.weather.user_agent);

    Ok(Arc::new(TravelPlanningWorkflow::new(
        Arc::new(currency),
        Arc::new(weather),
        generator,
    )))
}

/// Periodically drop finished plans past the retention window
pub fn spawn_cleanup_task(service: Arc<TravelPlanService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match service.cleanup_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "Cleaned up expired travel plans"),
                Err(e) => warn!(error = %e, "Travel plan cleanup failed"),
            }
        }
    })
}
