//! Domain layer - Core business logic and entities

pub mod error;
pub mod llm;
pub mod plan_task;
pub mod travel;
pub mod workflow;

pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    TextGenerator, Usage,
};
pub use plan_task::{PlanTask, PlanTaskRepository, TaskError, TaskId, TaskStatus};
pub use travel::{
    BudgetBreakdown, Coordinates, CurrencyConversion, CurrencyService, DestinationResolver,
    TravelItinerary, TravelPlanRequest, TravelStyle, WeatherForecast, WeatherService,
};
pub use workflow::{
    ChannelProgressSink, GathererOutcome, NoopProgressSink, ProgressSink, TravelPlanner,
    WorkflowError, WorkflowProgress, WorkflowStage, WorkflowState,
};
