//! 配線: 設定と環境変数から標準アダプタを選び、ChatUseCase を組み立てる
//!
//! 認証情報はここで一度だけ読み込む。欠けていれば他の処理より先に失敗する。

use std::sync::Arc;
use std::time::Duration;

use common::adapter::{FileJsonLog, NoopLog, StderrJsonLog};
use common::domain::{ModelName, SessionId};
use common::error::Error;
use common::llm::{create_driver, ProviderOptions, ProviderType};
use common::ports::outbound::{EnvResolver, Log, LogLevel, LogRecord};

use crate::adapter::{DotenvEnvResolver, EnvCredentialLoader, LlmCompletionClient, MemoryTranscriptStore};
use crate::cli::Config;
use crate::ports::outbound::{CompletionClient, CredentialLoader};
use crate::usecase::app::{ChatDeps, ChatUseCase, IoDeps, ModelDeps, ObsDeps, SessionDeps};

pub const GROQ_BASE_URL_ENV: &str = "GROQ_BASE_URL";
pub const GROQ_MODEL_ENV: &str = "GROQ_MODEL";
pub const LOG_FILE_ENV: &str = "CHATBOT_LOG_FILE";

/// 組み立て済みのアプリ
pub struct App {
    pub chat: ChatUseCase,
    pub log: Arc<dyn Log>,
}

/// ログ出力先: --log-file > $CHATBOT_LOG_FILE > -v なら stderr > なし
pub fn wire_log(config: &Config, env: &dyn EnvResolver) -> Arc<dyn Log> {
    let path = config
        .log_file
        .clone()
        .or_else(|| env.non_empty_var(LOG_FILE_ENV).map(Into::into));
    match path {
        Some(p) => Arc::new(FileJsonLog::new(p)),
        None if config.verbose => Arc::new(StderrJsonLog),
        None => Arc::new(NoopLog),
    }
}

pub fn resolve_provider_type(config: &Config) -> Result<ProviderType, Error> {
    match &config.profile {
        None => Ok(ProviderType::Groq),
        Some(name) => ProviderType::from_str(name).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown provider: {}. Supported providers: groq, echo",
                name
            ))
        }),
    }
}

/// モデル・エンドポイント等のプロバイダ設定: -m > $GROQ_MODEL > 既定、$GROQ_BASE_URL > 既定
pub fn provider_options(config: &Config, env: &dyn EnvResolver) -> ProviderOptions {
    ProviderOptions {
        model: config
            .model
            .clone()
            .or_else(|| env.non_empty_var(GROQ_MODEL_ENV).map(ModelName::new)),
        base_url: env.non_empty_var(GROQ_BASE_URL_ENV),
        temperature: config.temperature,
        timeout: config.timeout_secs.map(Duration::from_secs),
    }
}

/// 標準アダプタで App を組み立てる
///
/// ログを最初に用意し、以降の配線エラーもログに残す。
/// `.env` の読み込みと認証情報の解決に失敗した場合は Err（致命的エラー）。
pub fn wire_chatbot(
    config: &Config,
    env: Arc<dyn EnvResolver>,
    io: IoDeps,
) -> Result<App, Error> {
    let dotenv = DotenvEnvResolver::load(env, config.env_file.as_deref())?;
    let warnings = dotenv.warnings().to_vec();
    let env: Arc<dyn EnvResolver> = Arc::new(dotenv);

    let log = wire_log(config, env.as_ref());
    for warning in warnings {
        let _ = log.log(
            &LogRecord::new(LogLevel::Warn, warning)
                .layer("wiring")
                .kind("config"),
        );
    }

    let client = wire_client(config, Arc::clone(&env)).map_err(|e| {
        let _ = log.log(
            &LogRecord::new(LogLevel::Error, e.to_string())
                .layer("wiring")
                .kind("error"),
        );
        e
    })?;
    Ok(wire_with_client(client, io, log))
}

/// プロファイルを選び、必要なら認証情報を読み込んで補完クライアントを作る
fn wire_client(config: &Config, env: Arc<dyn EnvResolver>) -> Result<Arc<dyn CompletionClient>, Error> {
    let provider_type = resolve_provider_type(config)?;
    let credential = if provider_type.requires_credential() {
        Some(EnvCredentialLoader::new(Arc::clone(&env)).load()?)
    } else {
        None
    };
    let driver = create_driver(provider_type, provider_options(config, env.as_ref()), credential)?;
    Ok(Arc::new(LlmCompletionClient::new(driver, config.system.clone())))
}

/// 補完クライアントを差し替えて組み立てる（プロバイダ選択済みのとき・テスト用）
pub fn wire_with_client(
    client: Arc<dyn CompletionClient>,
    io: IoDeps,
    log: Arc<dyn Log>,
) -> App {
    let chat = ChatUseCase::new(ChatDeps {
        session: SessionDeps {
            store: Arc::new(MemoryTranscriptStore::new()),
            session_id: SessionId::default(),
        },
        model: ModelDeps { client },
        io,
        obs: ObsDeps {
            log: Arc::clone(&log),
        },
    });
    App { chat, log }
}
