//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成する。

use crate::domain::{Credential, ModelName};
use crate::error::Error;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::{LlmProvider, Message};
use serde_json::Value;
use std::time::Duration;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Groq（OpenAI Chat Completions 互換）
    Groq,
    /// Echo（最後の発話を返すだけ）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Echo => "echo",
        }
    }

    /// 認証情報が必要か
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::Groq)
    }
}

/// プロバイダ生成時のオプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderOptions {
    pub model: Option<ModelName>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub timeout: Option<Duration>,
}

/// プロバイダのenumラッパー
pub enum AnyProvider {
    Groq(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Groq(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Groq(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Groq(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }

    fn make_request_payload(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        match self {
            Self::Groq(p) => p.make_request_payload(system_instruction, history),
            Self::Echo(p) => p.make_request_payload(system_instruction, history),
        }
    }
}

/// プロバイダを作成する
///
/// Groq は認証情報が必須。Echo では `credential` を無視する。
pub fn create_provider(
    provider_type: ProviderType,
    options: ProviderOptions,
    credential: Option<Credential>,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::Groq => {
            let credential = credential
                .ok_or_else(|| Error::env("groq provider requires a credential"))?;
            let provider = OpenAiCompatProvider::new(
                options.model,
                options.base_url,
                credential,
                options.temperature,
                options.timeout,
            )?;
            Ok(AnyProvider::Groq(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成する
pub fn create_driver(
    provider_type: ProviderType,
    options: ProviderOptions,
    credential: Option<Credential>,
) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(provider_type, options, credential)?;
    Ok(LlmDriver::new(provider))
}
