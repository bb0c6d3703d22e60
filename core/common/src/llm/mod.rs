//! LLMドライバーとプロバイダの実装
//!
//! プロバイダ（Groq、Echo）で共通する処理を提供する。

pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;

pub use driver::LlmDriver;
pub use factory::{create_driver, create_provider, AnyProvider, ProviderOptions, ProviderType};
pub use provider::{LlmProvider, Message, Role};
