//! LlmDriver を使った CompletionClient の標準実装
//!
//! ドライバが返すどの種類のエラー（通信・非 2xx・API エラー本文・JSON 不正・本文なし）も
//! この境界で CompletionOutcome::Failed にまとめる。リトライはしない。

use crate::ports::outbound::{CompletionClient, CompletionOutcome};
use common::llm::{LlmDriver, LlmProvider, Message};

pub struct LlmCompletionClient<P: LlmProvider> {
    driver: LlmDriver<P>,
    system_instruction: Option<String>,
}

impl<P: LlmProvider> LlmCompletionClient<P> {
    pub fn new(driver: LlmDriver<P>, system_instruction: Option<String>) -> Self {
        Self {
            driver,
            system_instruction,
        }
    }
}

impl<P: LlmProvider> CompletionClient for LlmCompletionClient<P> {
    fn complete(&self, transcript: &[Message]) -> CompletionOutcome {
        match self
            .driver
            .complete(self.system_instruction.as_deref(), transcript)
        {
            Ok(text) => CompletionOutcome::Reply(Message::assistant(text)),
            Err(e) => CompletionOutcome::Failed(e.to_string()),
        }
    }
}
