//! Staged travel planning workflow
//!
//! Phase 1 gathers currency, weather and local knowledge concurrently and
//! tolerates failures of each. Itinerary, budget and assembly run in order
//! afterwards; any failure there aborts the run.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use super::assembly::{assemble, itinerary_excerpt};
use crate::domain::travel::{KeywordDestinationResolver, HOME_CURRENCY};
use crate::domain::workflow::steps;
use crate::domain::{
    CurrencyConversion, CurrencyService, DestinationResolver, DomainError, GathererOutcome,
    ProgressSink, TextGenerator, TravelItinerary, TravelPlanRequest, TravelPlanner,
    WeatherForecast, WeatherService, WorkflowError, WorkflowProgress, WorkflowStage,
    WorkflowState,
};
use crate::infrastructure::agents::{
    BudgetOptimizerAgent, CurrencyConverterAgent, ItineraryPlannerAgent, LocalKnowledgeAgent,
    WeatherAdvisorAgent,
};
use crate::infrastructure::metrics::{record_gatherer_outcome, record_workflow_run};

const WORKFLOW_AGENT: &str = "Workflow";

/// Forwards only non-decreasing percentages to the wrapped sink
struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressSink,
    last: AtomicU8,
}

impl<'a> MonotonicProgress<'a> {
    fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            last: AtomicU8::new(0),
        }
    }

    fn emit(&self, percentage: u8, step: &str, agent: &str) {
        let previous = self.last.fetch_max(percentage, Ordering::SeqCst);
        if percentage >= previous {
            self.inner
                .report(WorkflowProgress::new(percentage, step).with_agent(agent));
        }
    }
}

/// Races `future` against cancellation
async fn cancellable<T>(
    cancel: &CancellationToken,
    future: impl Future<Output = Result<T, DomainError>>,
) -> Result<T, DomainError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(DomainError::Cancelled),
        result = future => result,
    }
}

fn ensure_active(cancel: &CancellationToken, stage: WorkflowStage) -> Result<(), WorkflowError> {
    if cancel.is_cancelled() {
        Err(WorkflowError::cancelled(stage))
    } else {
        Ok(())
    }
}

/// Turns a gatherer result into an outcome, logging tolerated failures
fn settle<T>(result: Result<T, DomainError>, gatherer: &str) -> GathererOutcome<T> {
    match result {
        Ok(value) => GathererOutcome::Collected(value),
        Err(DomainError::Cancelled) => GathererOutcome::Cancelled,
        Err(e) => {
            warn!(error = %e, "Error gathering {} info, continuing without it", gatherer);
            GathererOutcome::failed(e)
        }
    }
}

/// The multi-agent planner behind [`TravelPlanner`]
#[derive(Debug, Clone)]
pub struct TravelPlanningWorkflow {
    currency_converter: CurrencyConverterAgent,
    weather_advisor: WeatherAdvisorAgent,
    local_knowledge: LocalKnowledgeAgent,
    itinerary_planner: ItineraryPlannerAgent,
    budget_optimizer: BudgetOptimizerAgent,
    destinations: Arc<dyn DestinationResolver>,
}

impl TravelPlanningWorkflow {
    pub fn new(
        currency: Arc<dyn CurrencyService>,
        weather: Arc<dyn WeatherService>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            currency_converter: CurrencyConverterAgent::new(currency, generator.clone()),
            weather_advisor: WeatherAdvisorAgent::new(weather, generator.clone()),
            local_knowledge: LocalKnowledgeAgent::new(generator.clone()),
            itinerary_planner: ItineraryPlannerAgent::new(generator.clone()),
            budget_optimizer: BudgetOptimizerAgent::new(generator),
            destinations: Arc::new(KeywordDestinationResolver::new()),
        }
    }

    pub fn with_destination_resolver(mut self, destinations: Arc<dyn DestinationResolver>) -> Self {
        self.destinations = destinations;
        self
    }

    async fn gather_currency(
        &self,
        request: &TravelPlanRequest,
        progress: &MonotonicProgress<'_>,
        cancel: &CancellationToken,
    ) -> GathererOutcome<CurrencyConversion> {
        progress.emit(
            15,
            "Converting budget to local currency...",
            CurrencyConverterAgent::AGENT_TYPE,
        );

        let currency = self.destinations.currency_for(request.destination());
        if currency.eq_ignore_ascii_case(HOME_CURRENCY) {
            return GathererOutcome::skipped("destination uses the home currency");
        }

        let result = cancellable(
            cancel,
            self.currency_converter
                .convert_budget(request.budget(), HOME_CURRENCY, &currency),
        )
        .await;

        if let Ok(conversion) = &result {
            info!(summary = %conversion.summary(), "Currency conversion");
        }
        settle(result, "currency")
    }

    async fn gather_weather(
        &self,
        request: &TravelPlanRequest,
        progress: &MonotonicProgress<'_>,
        cancel: &CancellationToken,
    ) -> GathererOutcome<Vec<WeatherForecast>> {
        progress.emit(20, "Fetching weather forecast...", WeatherAdvisorAgent::AGENT_TYPE);

        let coordinates = self.destinations.coordinates_for(request.destination());
        if coordinates.is_unknown() {
            return GathererOutcome::skipped("no coordinates for destination");
        }

        let result = cancellable(
            cancel,
            self.weather_advisor.forecast(
                coordinates.latitude,
                coordinates.longitude,
                request.start_date(),
                request.trip_days(),
            ),
        )
        .await;

        if let Ok(forecasts) = &result {
            info!(count = forecasts.len(), "Retrieved weather forecast periods");
        }
        settle(result, "weather")
    }

    async fn gather_local_knowledge(
        &self,
        request: &TravelPlanRequest,
        progress: &MonotonicProgress<'_>,
        cancel: &CancellationToken,
    ) -> GathererOutcome<String> {
        progress.emit(
            25,
            "Gathering local knowledge and tips...",
            LocalKnowledgeAgent::AGENT_TYPE,
        );

        let result = cancellable(
            cancel,
            self.local_knowledge.local_knowledge(
                request.destination(),
                request.interests(),
                request.special_requests(),
            ),
        )
        .await;

        if result.is_ok() {
            info!(destination = request.destination(), "Retrieved local knowledge");
        }
        settle(result, "local knowledge")
    }

    /// Phase 1: fan out the three gatherers, fan in on all of them
    async fn gather(
        &self,
        request: &TravelPlanRequest,
        state: &mut WorkflowState,
        progress: &MonotonicProgress<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), WorkflowError> {
        state.advance_to(WorkflowStage::Gathering);

        let (currency, weather, knowledge) = tokio::join!(
            self.gather_currency(request, progress, cancel),
            self.gather_weather(request, progress, cancel),
            self.gather_local_knowledge(request, progress, cancel),
        );

        record_gatherer_outcome("currency", currency.label());
        record_gatherer_outcome("weather", weather.label());
        record_gatherer_outcome("local_knowledge", knowledge.label());

        if currency.is_cancelled() || weather.is_cancelled() || knowledge.is_cancelled() {
            return Err(WorkflowError::cancelled(WorkflowStage::Gathering));
        }

        // Skipped lookups still count as done; local knowledge only on success
        if currency.is_finished() {
            state.mark_step_complete(steps::CURRENCY_GATHERING);
        }
        if let Some(conversion) = currency.into_value() {
            state.set_currency_conversion(conversion);
        }

        if weather.is_finished() {
            state.mark_step_complete(steps::WEATHER_GATHERING);
        }
        if let Some(forecasts) = weather.into_value() {
            state.set_weather_forecasts(forecasts);
        }

        if let Some(text) = knowledge.into_value() {
            state.set_local_knowledge(text);
            state.mark_step_complete(steps::LOCAL_KNOWLEDGE_GATHERING);
        }

        state.mark_step_complete(steps::INFORMATION_GATHERING);
        state.advance_to(WorkflowStage::Itinerary);
        Ok(())
    }

    async fn run(
        &self,
        request: &TravelPlanRequest,
        task_id: &str,
        progress: &MonotonicProgress<'_>,
        cancel: &CancellationToken,
    ) -> Result<TravelItinerary, WorkflowError> {
        if task_id.trim().is_empty() {
            return Err(WorkflowError::invalid_input("Task id cannot be empty"));
        }
        request
            .validate()
            .map_err(|e| WorkflowError::invalid_input(e.to_string()))?;

        let mut state = WorkflowState::new(task_id);
        ensure_active(cancel, WorkflowStage::Init)?;

        progress.emit(10, "Gathering destination information...", WORKFLOW_AGENT);
        self.gather(request, &mut state, progress, cancel).await?;

        // Phase 2: itinerary
        ensure_active(cancel, WorkflowStage::Itinerary)?;
        progress.emit(
            40,
            "Creating personalized itinerary...",
            ItineraryPlannerAgent::AGENT_TYPE,
        );
        let itinerary = cancellable(
            cancel,
            self.itinerary_planner.create_itinerary(
                request,
                state.weather_forecasts(),
                state.local_knowledge(),
            ),
        )
        .await
        .map_err(|e| step_error(task_id, steps::ITINERARY_PLANNING, WorkflowStage::Itinerary, e))?;
        state.set_itinerary(itinerary.clone());
        state.mark_step_complete(steps::ITINERARY_PLANNING);
        state.advance_to(WorkflowStage::Budget);

        // Phase 3: budget
        ensure_active(cancel, WorkflowStage::Budget)?;
        progress.emit(
            70,
            "Optimizing budget allocation...",
            BudgetOptimizerAgent::AGENT_TYPE,
        );
        let budget = cancellable(
            cancel,
            self.budget_optimizer.optimize_budget(
                request.budget(),
                request.trip_days(),
                request.destination(),
                request.travel_style(),
                &itinerary_excerpt(&itinerary),
            ),
        )
        .await
        .map_err(|e| step_error(task_id, steps::BUDGET_OPTIMIZATION, WorkflowStage::Budget, e))?;
        state.set_budget(budget.clone());
        state.mark_step_complete(steps::BUDGET_OPTIMIZATION);
        state.advance_to(WorkflowStage::Assembly);

        // Phase 4: assembly
        ensure_active(cancel, WorkflowStage::Assembly)?;
        progress.emit(85, "Assembling complete travel plan...", WORKFLOW_AGENT);
        let plan = assemble(request, &state, &itinerary, budget);
        state.mark_step_complete(steps::FINAL_ASSEMBLY);
        state.advance_to(WorkflowStage::Done);

        progress.emit(100, "Travel plan complete!", WORKFLOW_AGENT);
        Ok(plan)
    }
}

fn step_error(
    task_id: &str,
    step: &'static str,
    stage: WorkflowStage,
    source: DomainError,
) -> WorkflowError {
    let error = WorkflowError::step_failed(step, stage, source);
    if !error.is_cancelled() {
        error!(task_id, step, error = %error, "Workflow step failed");
    }
    error
}

#[async_trait]
impl TravelPlanner for TravelPlanningWorkflow {
    #[instrument(
        skip(self, request, progress, cancel),
        fields(destination = request.destination())
    )]
    async fn execute(
        &self,
        request: &TravelPlanRequest,
        task_id: &str,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<TravelItinerary, WorkflowError> {
        info!("Starting multi-agent workflow");
        let started = Instant::now();
        let progress = MonotonicProgress::new(progress);

        let result = self.run(request, task_id, &progress, cancel).await;

        let outcome = match &result {
            Ok(_) => {
                info!("Multi-agent workflow completed");
                "completed"
            }
            Err(e) if e.is_cancelled() => {
                warn!("Multi-agent workflow cancelled");
                e.outcome()
            }
            Err(e) => {
                error!(error = %e, "Error in multi-agent workflow");
                e.outcome()
            }
        };
        record_workflow_run(outcome, started.elapsed());

        result
    }
}
