//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → テキスト抽出）を提供する。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 会話履歴を送信して次のアシスタント応答を取得
    ///
    /// # Arguments
    /// * `system_instruction` - システム指示（オプション）
    /// * `history` - 会話履歴（古い順）
    ///
    /// # Returns
    /// * `Ok(String)` - LLMからの応答テキスト
    /// * `Err(Error)` - 通信・API・パースいずれかの失敗。応答テキストが無い場合も失敗とする
    pub fn complete(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(system_instruction, history)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        self.provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::json("No text in response"))
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    // モックプロバイダ
    struct MockProvider {
        response: Result<String, Error>,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn make_http_request(&self, _request_json: &str) -> Result<String, Error> {
            self.response.clone()
        }

        fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
            let v: Value = serde_json::from_str(response_json)?;
            Ok(v["text"].as_str().map(|s| s.to_string()))
        }

        fn make_request_payload(
            &self,
            _system_instruction: Option<&str>,
            history: &[Message],
        ) -> Result<Value, Error> {
            Ok(serde_json::json!({ "messages": history }))
        }
    }

    #[test]
    fn test_llm_driver_complete() {
        let driver = LlmDriver::new(MockProvider {
            response: Ok(r#"{"text":"Hello, world!"}"#.to_string()),
        });
        assert_eq!(driver.provider().name(), "mock");
        let result = driver.complete(None, &[Message::user("hi")]);
        assert_eq!(result.unwrap(), "Hello, world!");
    }

    #[test]
    fn test_llm_driver_complete_without_text_fails() {
        let driver = LlmDriver::new(MockProvider {
            response: Ok(r#"{"other":1}"#.to_string()),
        });
        let err = driver.complete(None, &[Message::user("hi")]).unwrap_err();
        assert_eq!(err.to_string(), "No text in response");
    }

    #[test]
    fn test_llm_driver_complete_propagates_http_error() {
        let driver = LlmDriver::new(MockProvider {
            response: Err(Error::http("HTTP request failed: timed out")),
        });
        let err = driver.complete(None, &[]).unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
