//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（トランスクリプト・LLM・認証情報・標準入出力）を使うための trait

pub mod inbound;
pub mod outbound;
