//! トランスクリプト保存の Outbound ポート
//!
//! セッション識別子ごとに追記専用のメッセージ列を保持する。永続化はしない。

use common::domain::SessionId;
use common::llm::Message;

pub trait TranscriptStore: Send + Sync {
    /// 末尾に追記する。初回は空の列を作ってから追記する
    fn append(&self, session: &SessionId, message: Message);

    /// 現時点の列のコピー（古い順）。未使用のセッションは空
    fn snapshot(&self, session: &SessionId) -> Vec<Message>;

    /// セッションの列を破棄する（対話モードの /clear）
    fn clear(&self, session: &SessionId);
}
