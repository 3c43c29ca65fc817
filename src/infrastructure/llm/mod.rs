//! LLM provider implementations

mod azure_openai;
mod factory;
mod openai;
mod text_generator;

pub use azure_openai::{AzureOpenAiConfig, AzureOpenAiProvider};
pub use factory::LlmProviderFactory;
pub use openai::OpenAiProvider;
pub use text_generator::LlmTextGenerator;
