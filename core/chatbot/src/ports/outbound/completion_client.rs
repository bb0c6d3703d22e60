//! 補完クライアントの Outbound ポート
//!
//! リモートモデル 1 回分の呼び出し。失敗は例外ではなく CompletionOutcome::Failed で返す。

use common::llm::Message;

/// 1 回の補完結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// role = assistant の完全なメッセージ
    Reply(Message),
    /// 通信・認証・レート制限・応答不正などの失敗（人が読める説明）
    Failed(String),
}

/// トランスクリプト全体（古い順）から次のアシスタント応答を得る
pub trait CompletionClient: Send + Sync {
    fn complete(&self, transcript: &[Message]) -> CompletionOutcome;
}
