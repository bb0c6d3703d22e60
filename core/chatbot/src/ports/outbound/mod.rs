//! Outbound ポート: usecase が外界を使うための trait

pub mod completion_client;
pub mod credential_loader;
pub mod io;
pub mod transcript_store;

pub use completion_client::{CompletionClient, CompletionOutcome};
pub use credential_loader::CredentialLoader;
pub use io::{InputSource, OutputSink};
pub use transcript_store::TranscriptStore;
