//! 標準入出力の Outbound ポート
//!
//! usecase は stdin / stdout に直接触れず、この trait 経由で読み書きする。

use crate::domain::ChatOutput;
use common::error::Error;

/// 発話の入力元
pub trait InputSource: Send + Sync {
    /// 入力ストリーム全体を 1 つの文字列として読む
    fn read_all(&self) -> Result<String, Error>;

    /// 1 行読む（改行は含まない）。EOF なら None
    fn read_line(&self) -> Result<Option<String>, Error>;
}

/// 結果 JSON の出力先（1 回の emit で 1 行）
pub trait OutputSink: Send + Sync {
    fn emit(&self, output: &ChatOutput) -> Result<(), Error>;
}
