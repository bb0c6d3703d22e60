//! 認証情報読み込みの Outbound ポート

use common::domain::Credential;
use common::error::Error;

/// 起動時に一度だけ認証情報を解決する。未設定・空なら致命的エラー
pub trait CredentialLoader: Send + Sync {
    fn load(&self) -> Result<Credential, Error>;
}
