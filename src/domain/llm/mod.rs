//! LLM provider domain models and traits

mod message;
mod provider;
mod request;
mod response;
mod text_generator;

pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use request::{LlmRequest, LlmRequestBuilder};
pub use response::{FinishReason, LlmResponse, Usage};
pub use text_generator::TextGenerator;

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
#[cfg(test)]
pub use text_generator::mock::MockTextGenerator;
