//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。終了コードへの対応は `exit_code` に集約する。

use thiserror::Error as ThisError;

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数不正（コマンドライン・入力）
    #[error("{0}")]
    InvalidArgs(String),
    /// 環境変数・設定の不備
    #[error("{0}")]
    Env(String),
    /// HTTP 通信・リモート API のエラー
    #[error("{0}")]
    Http(String),
    /// JSON のパース・シリアライズ失敗
    #[error("{0}")]
    Json(String),
    /// 標準入出力・ファイル I/O の失敗
    #[error("{0}")]
    Io(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgs(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// 使い方の誤りか（main で usage を表示するかの判定）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgs(_))
    }

    /// プロセス終了コード
    ///
    /// 引数不正は 64（EX_USAGE）、それ以外の致命的エラーは 1。
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgs(_) => 64,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
