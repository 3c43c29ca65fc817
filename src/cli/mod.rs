//! Command line entry points
//!
//! - `serve`: run the HTTP API with the background planner
//! - `plan`: run one travel plan locally and print the result

pub mod plan;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Travel Planner - multi-agent itinerary generation
#[derive(Parser)]
#[command(name = "travel-planner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Plan one trip locally, printing progress and the itinerary JSON
    Plan(plan::PlanArgs),
}

/// Load `.env`, layered configuration and the log subscriber
fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);
    config
}
