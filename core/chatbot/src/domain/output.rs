//! stdout に書く 1 行分の結果 JSON

use common::llm::Message;
use serde::Serialize;

/// 結果 JSON（1 回の出力につき 1 行）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatOutput {
    /// `{"response": ...}`
    Response { response: String },
    /// `{"error": ...}`（致命的エラーのみ）
    Error { error: String },
    /// `{"success": true, "response": ...}`（--check）
    Check { success: bool, response: String },
    /// `{"messages": [...]}`（対話モードの /history）
    History { messages: Vec<Message> },
    /// `{"success": true, "message": ...}`（対話モードの /clear）
    Cleared { success: bool, message: String },
}

impl ChatOutput {
    pub fn response(text: impl Into<String>) -> Self {
        ChatOutput::Response {
            response: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        ChatOutput::Error { error: text.into() }
    }

    pub fn check_passed(text: impl Into<String>) -> Self {
        ChatOutput::Check {
            success: true,
            response: text.into(),
        }
    }

    pub fn history(messages: Vec<Message>) -> Self {
        ChatOutput::History { messages }
    }

    pub fn cleared() -> Self {
        ChatOutput::Cleared {
            success: true,
            message: "Chat history cleared".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json() {
        let json = serde_json::to_string(&ChatOutput::response("4")).unwrap();
        assert_eq!(json, r#"{"response":"4"}"#);
    }

    #[test]
    fn test_error_json() {
        let json = serde_json::to_string(&ChatOutput::error(
            "GROQ_API_KEY not found in environment variables",
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"error":"GROQ_API_KEY not found in environment variables"}"#
        );
    }

    #[test]
    fn test_history_and_cleared_json() {
        let json = serde_json::to_string(&ChatOutput::history(vec![Message::user("hi")])).unwrap();
        assert_eq!(json, r#"{"messages":[{"role":"user","content":"hi"}]}"#);
        let json = serde_json::to_string(&ChatOutput::cleared()).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Chat history cleared"}"#);
    }

    #[test]
    fn test_check_json() {
        let json = serde_json::to_string(&ChatOutput::check_passed("Connection successful!")).unwrap();
        assert_eq!(json, r#"{"success":true,"response":"Connection successful!"}"#);
    }
}
