//! Echoプロバイダの実装
//!
//! 実際にLLM APIを呼び出さず、最後のユーザー発話をそのまま返す。
//! API キー不要。デバッグやテスト用に使用する。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message, Role};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 通信はせず、リクエスト中の最後の user 発話で Chat Completions 形式の応答を組み立てる
        let request: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::json(format!("Failed to parse request JSON: {}", e)))?;
        let last_user = request["messages"]
            .as_array()
            .and_then(|msgs| {
                msgs.iter()
                    .rev()
                    .find(|m| m["role"] == Role::User.as_str())
            })
            .and_then(|m| m["content"].as_str())
            .unwrap_or("");
        let response = json!({
            "choices": [{
                "message": { "role": "assistant", "content": format!("[echo] {}", last_user) }
            }]
        });
        Ok(response.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        Ok(v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string()))
    }

    fn make_request_payload(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        let mut payload = json!({ "messages": history });
        if let Some(system) = system_instruction {
            payload["system_instruction"] = json!(system);
        }
        Ok(payload)
    }
}
