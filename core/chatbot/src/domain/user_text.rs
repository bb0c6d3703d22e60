//! ユーザー発話のドメイン型（LLM に送るメッセージ本文）

/// 前後の空白を除去済みのユーザー発話
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserText(String);

impl UserText {
    /// 入力ストリームの生の内容から作る（前後の空白・改行を除去）
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }
}

impl std::ops::Deref for UserText {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for UserText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
