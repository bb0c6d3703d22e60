//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::domain::ChatCommand;
use common::error::Error;

/// コマンドを実行する Inbound ポート
///
/// main はこの trait を実装した Runner の run を呼び出し、戻り値を終了コードにする。
pub trait UseCaseRunner {
    fn run(&self, command: ChatCommand) -> Result<i32, Error>;
}
