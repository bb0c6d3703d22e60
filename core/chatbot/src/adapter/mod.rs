//! アダプター（ポートの標準実装）

pub mod dotenv_env;
pub mod env_credential_loader;
pub mod llm_completion_client;
pub mod memory_transcript_store;
pub mod stdio;
pub mod stub_completion;

pub use dotenv_env::DotenvEnvResolver;
pub use env_credential_loader::EnvCredentialLoader;
pub use llm_completion_client::LlmCompletionClient;
pub use memory_transcript_store::MemoryTranscriptStore;
pub use stdio::{StdinInput, StdoutSink};
#[cfg(test)]
pub use stub_completion::{BrokenInput, MemoryInput, MemoryOutput, StubCompletionClient};
