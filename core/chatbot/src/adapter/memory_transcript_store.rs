//! プロセス内メモリにトランスクリプトを保持する TranscriptStore 実装
//!
//! 寿命はプロセスと同じ。上限・退避・永続化はない。

use crate::domain::Transcript;
use crate::ports::outbound::TranscriptStore;
use common::domain::SessionId;
use common::llm::Message;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryTranscriptStore {
    sessions: Mutex<HashMap<SessionId, Transcript>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, Transcript>> {
        // 単一スレッドでしか使わないため、poison されていても中身はそのまま使える
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TranscriptStore for MemoryTranscriptStore {
    fn append(&self, session: &SessionId, message: Message) {
        self.sessions()
            .entry(session.clone())
            .or_default()
            .push(message);
    }

    fn snapshot(&self, session: &SessionId) -> Vec<Message> {
        self.sessions()
            .get(session)
            .map(|t| t.messages().to_vec())
            .unwrap_or_default()
    }

    fn clear(&self, session: &SessionId) {
        self.sessions().remove(session);
    }
}
