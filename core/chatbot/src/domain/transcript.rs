//! 会話トランスクリプト（Transcript）のドメイン型
//!
//! リモートモデルにそのまま渡すプロンプト文脈。挿入順が意味を持つため、
//! 並べ替え・重複除去・間引きはしない（追記のみ）。

use common::llm::Message;

/// 1 セッション分の会話メッセージ列（追記専用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[allow(dead_code)] // テストで使用
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
