//! 共通ポート
//!
//! common は入り口を持たないため outbound のみ。環境変数の参照とログ出力を trait で表す。

pub mod outbound;
