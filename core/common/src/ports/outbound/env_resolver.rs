//! 環境変数解決 Outbound ポート
//!
//! usecase / adapter はこの trait 経由でのみ環境変数にアクセスする。
//! テストでは固定の値を返すモックを注入する。

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を取得する。未設定または UTF-8 でない場合は None
    fn var(&self, name: &str) -> Option<String>;

    /// 空文字列を未設定とみなして取得する（前後の空白は除去）
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
