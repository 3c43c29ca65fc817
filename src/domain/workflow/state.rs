//! Per-run workflow state
//!
//! Holds the typed intermediate results of one planning run together with
//! the completed-step log and the phase counter. A state is owned by exactly
//! one run and discarded after assembly.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::travel::{BudgetBreakdown, CurrencyConversion, WeatherForecast};

/// Step names recorded in the completed-step log
pub mod steps {
    pub const CURRENCY_GATHERING: &str = "CurrencyGathering";
    pub const WEATHER_GATHERING: &str = "WeatherGathering";
    pub const LOCAL_KNOWLEDGE_GATHERING: &str = "LocalKnowledgeGathering";
    pub const INFORMATION_GATHERING: &str = "InformationGathering";
    pub const ITINERARY_PLANNING: &str = "ItineraryPlanning";
    pub const BUDGET_OPTIMIZATION: &str = "BudgetOptimization";
    pub const FINAL_ASSEMBLY: &str = "FinalAssembly";
}

/// Stages of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowStage {
    Init,
    Gathering,
    Itinerary,
    Budget,
    Assembly,
    Done,
}

impl WorkflowStage {
    /// Number of phases finished once this stage is entered (0-4)
    pub fn completed_phases(&self) -> u8 {
        match self {
            Self::Init | Self::Gathering => 0,
            Self::Itinerary => 1,
            Self::Budget => 2,
            Self::Assembly => 3,
            Self::Done => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Gathering => "gathering",
            Self::Itinerary => "itinerary",
            Self::Budget => "budget",
            Self::Assembly => "assembly",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowState {
    task_id: String,
    stage: WorkflowStage,
    completed_steps: Vec<&'static str>,
    started_at: DateTime<Utc>,

    currency_conversion: Option<CurrencyConversion>,
    weather_forecasts: Option<Vec<WeatherForecast>>,
    local_knowledge: Option<String>,
    itinerary: Option<String>,
    budget: Option<BudgetBreakdown>,
}

impl WorkflowState {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            stage: WorkflowStage::Init,
            completed_steps: Vec::new(),
            started_at: Utc::now(),
            currency_conversion: None,
            weather_forecasts: None,
            local_knowledge: None,
            itinerary: None,
            budget: None,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn current_phase(&self) -> u8 {
        self.stage.completed_phases()
    }

    /// Move forward to `stage`. Never moves backwards.
    pub fn advance_to(&mut self, stage: WorkflowStage) {
        if stage > self.stage {
            self.stage = stage;
        }
    }

    /// Idempotent; keeps first-completion order
    pub fn mark_step_complete(&mut self, step: &'static str) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }

    pub fn is_step_complete(&self, step: &str) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn completed_steps(&self) -> &[&'static str] {
        &self.completed_steps
    }

    pub fn set_currency_conversion(&mut self, conversion: CurrencyConversion) {
        self.currency_conversion = Some(conversion);
    }

    pub fn currency_conversion(&self) -> Option<&CurrencyConversion> {
        self.currency_conversion.as_ref()
    }

    pub fn set_weather_forecasts(&mut self, forecasts: Vec<WeatherForecast>) {
        self.weather_forecasts = Some(forecasts);
    }

    /// Forecast periods; empty when weather was not gathered
    pub fn weather_forecasts(&self) -> &[WeatherForecast] {
        self.weather_forecasts.as_deref().unwrap_or_default()
    }

    pub fn has_weather_forecasts(&self) -> bool {
        self.weather_forecasts.is_some()
    }

    pub fn set_local_knowledge(&mut self, knowledge: String) {
        self.local_knowledge = Some(knowledge);
    }

    /// Local knowledge text; empty when not gathered
    pub fn local_knowledge(&self) -> &str {
        self.local_knowledge.as_deref().unwrap_or_default()
    }

    pub fn set_itinerary(&mut self, itinerary: String) {
        self.itinerary = Some(itinerary);
    }

    pub fn itinerary(&self) -> Option<&str> {
        self.itinerary.as_deref()
    }

    pub fn set_budget(&mut self, budget: BudgetBreakdown) {
        self.budget = Some(budget);
    }

    pub fn budget(&self) -> Option<&BudgetBreakdown> {
        self.budget.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = WorkflowState::new("task-1");

        assert_eq!(state.task_id(), "task-1");
        assert_eq!(state.stage(), WorkflowStage::Init);
        assert_eq!(state.current_phase(), 0);
        assert!(state.completed_steps().is_empty());
        assert!(state.currency_conversion().is_none());
        assert!(state.weather_forecasts().is_empty());
        assert!(!state.has_weather_forecasts());
        assert_eq!(state.local_knowledge(), "");
    }

    #[test]
    fn test_mark_step_complete_is_idempotent() {
        let mut state = WorkflowState::new("task-1");
        state.mark_step_complete(steps::CURRENCY_GATHERING);
        state.mark_step_complete(steps::WEATHER_GATHERING);
        state.mark_step_complete(steps::CURRENCY_GATHERING);

        assert_eq!(
            state.completed_steps(),
            &[steps::CURRENCY_GATHERING, steps::WEATHER_GATHERING]
        );
        assert!(state.is_step_complete("WeatherGathering"));
    }

    #[test]
    fn test_phase_never_decreases() {
        let mut state = WorkflowState::new("task-1");
        state.advance_to(WorkflowStage::Budget);
        assert_eq!(state.current_phase(), 2);

        state.advance_to(WorkflowStage::Itinerary);
        assert_eq!(state.stage(), WorkflowStage::Budget);
        assert_eq!(state.current_phase(), 2);

        state.advance_to(WorkflowStage::Done);
        assert_eq!(state.current_phase(), 4);
    }

    #[test]
    fn test_setters_overwrite() {
        let mut state = WorkflowState::new("task-1");
        state.set_local_knowledge("first".to_string());
        state.set_local_knowledge("second".to_string());
        assert_eq!(state.local_knowledge(), "second");

        state.set_weather_forecasts(Vec::new());
        assert!(state.has_weather_forecasts());
        assert!(state.weather_forecasts().is_empty());
    }
}
