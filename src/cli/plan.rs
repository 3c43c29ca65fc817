//! Plan command - runs one workflow in-process

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::{ChannelProgressSink, TravelPlanRequest};

/// Arguments for the plan command
#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// Destination, e.g. "Paris, France"
    #[arg(long)]
    pub destination: String,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: NaiveDate,

    /// Total budget in USD
    #[arg(long)]
    pub budget: Decimal,

    /// Comma-separated interests
    #[arg(long, value_delimiter = ',')]
    pub interests: Vec<String>,

    /// budget, moderate, luxury or backpacker
    #[arg(long, default_value = "moderate")]
    pub travel_style: String,

    #[arg(long)]
    pub special_requests: Option<String>,
}

impl PlanArgs {
    pub fn into_request(self) -> TravelPlanRequest {
        let request = TravelPlanRequest::new(
            self.destination,
            self.start_date,
            self.end_date,
            self.budget,
        )
        .with_interests(self.interests.into_iter().map(|i| i.trim().to_string()))
        .with_travel_style(self.travel_style);

        match self.special_requests {
            Some(special) => request.with_special_requests(special),
            None => request,
        }
    }
}

/// Run a single plan, streaming progress lines to stderr and the itinerary to stdout
pub async fn run(args: PlanArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let request = args.into_request();
    request.validate()?;

    let planner = crate::create_planner(&config)?;
    let task_id = format!("cli-{}", uuid::Uuid::new_v4());

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling travel plan");
                cancel.cancel();
            }
        })
    };

    let (sink, mut receiver) = ChannelProgressSink::channel();
    let printer = tokio::spawn(async move {
        while let Some(progress) = receiver.recv().await {
            eprintln!("{}", progress);
        }
    });

    info!(task_id = %task_id, destination = request.destination(), "Planning trip");
    let result = planner.execute(&request, &task_id, &sink, &cancel).await;

    drop(sink);
    finish_printer(printer, &task_id).await;
    interrupt.abort();

    let itinerary = result?;
    let json = serde_json::to_string_pretty(&itinerary)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;

    Ok(())
}

/// Wait for buffered progress lines; a failed printer is logged, never fatal
async fn finish_printer(printer: JoinHandle<()>, task_id: &str) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            warn!(task_id = %task_id, error = %e, "Progress printer stopped");
            false
        }
    }
}
