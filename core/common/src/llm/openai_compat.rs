//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! Groq はこの形式の API を提供するため、base_url を差し替えるだけで使える。
//! ストリーミングは使わず、1 回のリクエストで全文を受け取る。

use crate::domain::{Credential, ModelName};
use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message};
use serde_json::{json, Value};
use std::time::Duration;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    client: reqwest::blocking::Client,
    model: ModelName,
    base_url: String,
    credential: Credential,
    temperature: f64,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき GROQ_DEFAULT_MODEL）
    /// * `base_url` - ベース URL（None のとき GROQ_BASE_URL）
    /// * `credential` - Authorization: Bearer に載せる API キー
    /// * `temperature` - 温度（None のとき DEFAULT_TEMPERATURE）
    /// * `timeout` - リクエスト全体のタイムアウト（None のとき reqwest の既定値）
    pub fn new(
        model: Option<ModelName>,
        base_url: Option<String>,
        credential: Credential,
        temperature: Option<f32>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| ModelName::new(GROQ_DEFAULT_MODEL));
        let base_url = base_url
            .unwrap_or_else(|| GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = temperature.map(f64::from).unwrap_or(DEFAULT_TEMPERATURE);

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            model,
            base_url,
            credential,
            temperature,
        })
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.credential.expose())
    }
}

/// 非 2xx レスポンス本文からエラーメッセージを取り出す
fn error_message_from_body(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.auth_header())
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = error_message_from_body(status, &response_text);
            return Err(Error::http(format!("Chat completions error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(err) = v.get("error") {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(text)
    }

    fn make_request_payload(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        let mut messages: Vec<Value> = Vec::with_capacity(history.len() + 1);

        if let Some(s) = system_instruction {
            messages.push(json!({ "role": "system", "content": s }));
        }

        for msg in history {
            messages.push(json!({ "role": msg.role.as_str(), "content": msg.content }));
        }

        Ok(json!({
            "model": self.model.as_ref(),
            "messages": messages,
            "temperature": self.temperature,
            "stream": false
        }))
    }
}
