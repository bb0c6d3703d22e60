//! chatbot 共通ライブラリ
//!
//! エラー型・ドメイン型・LLM プロバイダ・ログ/環境変数のポートとアダプタを提供する。

/// エラーハンドリング
pub mod error;

/// ドメイン型（SessionId, Credential 等）
pub mod domain;

/// LLMドライバーとプロバイダ
pub mod llm;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
