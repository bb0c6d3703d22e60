//! 1 ターンの処理（Turn Processor）
//!
//! user 追記 → スナップショットで補完 → 応答（または代替メッセージ）を追記、の直線的な 4 段。
//! 補完の失敗はここで吸収し、呼び出し元へは常に assistant の Message を返す。

use crate::domain::UserText;
use crate::ports::outbound::{CompletionClient, CompletionOutcome, TranscriptStore};
use common::domain::SessionId;
use common::llm::Message;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 補完失敗時の代替メッセージの接頭辞
pub const FAILURE_REPLY_PREFIX: &str = "Sorry, I encountered an error: ";

/// 補完失敗の説明から代替のアシスタントメッセージを作る
pub fn failure_reply(description: &str) -> Message {
    Message::assistant(format!("{}{}", FAILURE_REPLY_PREFIX, description))
}

pub struct TurnProcessor {
    store: Arc<dyn TranscriptStore>,
    client: Arc<dyn CompletionClient>,
    log: Arc<dyn Log>,
}

impl TurnProcessor {
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        client: Arc<dyn CompletionClient>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self { store, client, log }
    }

    pub fn process_turn(&self, session: &SessionId, user_text: &UserText) -> Message {
        self.store
            .append(session, Message::user(user_text.as_ref()));

        let transcript = self.store.snapshot(session);
        let reply = match self.client.complete(&transcript) {
            CompletionOutcome::Reply(message) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "turn completed")
                        .layer("usecase")
                        .kind("turn")
                        .field("session", session.to_string())
                        .field("context_len", transcript.len()),
                );
                message
            }
            CompletionOutcome::Failed(description) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "completion failed")
                        .layer("usecase")
                        .kind("turn")
                        .field("session", session.to_string())
                        .field("context_len", transcript.len())
                        .field("error", description.clone()),
                );
                failure_reply(&description)
            }
        };

        self.store.append(session, reply.clone());
        reply
    }
}
