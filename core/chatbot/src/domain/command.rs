//! chatbot コマンドの enum（Command Pattern）
//!
//! 1 ターン実行・対話モード・接続診断の分岐を enum で明示する。

/// chatbot の実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// 1 ターン実行。message が None のときは標準入力全体を発話として読む
    Turn { message: Option<String> },
    /// 標準入力を 1 行ずつ読み、同じセッションで複数ターンを処理する
    Interactive,
    /// 認証情報と接続を確認する（トランスクリプトには記録しない）
    Check,
}

impl ChatCommand {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::Turn { .. } => "turn",
            ChatCommand::Interactive => "interactive",
            ChatCommand::Check => "check",
        }
    }
}
