//! 環境変数から認証情報を読む CredentialLoader 実装

use crate::ports::outbound::CredentialLoader;
use common::domain::Credential;
use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::sync::Arc;

pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

pub struct EnvCredentialLoader {
    env: Arc<dyn EnvResolver>,
    var_name: &'static str,
}

impl EnvCredentialLoader {
    pub fn new(env: Arc<dyn EnvResolver>) -> Self {
        Self {
            env,
            var_name: GROQ_API_KEY_ENV,
        }
    }
}

impl CredentialLoader for EnvCredentialLoader {
    fn load(&self) -> Result<Credential, Error> {
        self.env
            .non_empty_var(self.var_name)
            .map(Credential::new)
            .ok_or_else(|| {
                Error::env(format!(
                    "{} not found in environment variables",
                    self.var_name
                ))
            })
    }
}
