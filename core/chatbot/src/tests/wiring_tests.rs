use crate::adapter::{MemoryInput, MemoryOutput};
use crate::cli::Config;
use crate::domain::ChatCommand;
use crate::ports::inbound::UseCaseRunner;
use crate::usecase::app::IoDeps;
use crate::wiring;
use common::adapter::MapEnvResolver;
use common::domain::{ModelName, ProviderName};
use common::llm::{create_provider, AnyProvider, ProviderOptions, ProviderType};
use common::ports::outbound::{LogLevel, LogRecord};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const KEY: &str = "gsk_secret_value_123";

/// カレントディレクトリの .env に左右されないよう、空の env ファイルを明示する
fn base_config(dir: &Path) -> Config {
    let env_file = dir.join("empty.env");
    fs::write(&env_file, "").unwrap();
    Config {
        env_file: Some(env_file),
        ..Default::default()
    }
}

fn read_log(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn messages(records: &[serde_json::Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["message"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn run_turn(config: &Config, env: MapEnvResolver, input: &str) -> (i32, Arc<MemoryOutput>) {
    let output = Arc::new(MemoryOutput::new());
    let io = IoDeps {
        input: Arc::new(MemoryInput::new(input)),
        output: output.clone(),
    };
    let code = match wiring::wire_chatbot(config, Arc::new(env), io) {
        Ok(app) => {
            let runner = crate::Runner { app };
            crate::finish(runner.run(ChatCommand::Turn { message: None }), output.as_ref())
        }
        Err(e) => crate::finish(Err(e), output.as_ref()),
    };
    (code, output)
}

#[test]
fn test_model_flag_beats_env() {
    let config = Config {
        model: Some(ModelName::new("from-flag")),
        ..Default::default()
    };
    let env = MapEnvResolver::new().with("GROQ_MODEL", "from-env");
    let options = wiring::provider_options(&config, &env);
    assert_eq!(options.model, Some(ModelName::new("from-flag")));
}

#[test]
fn test_model_env_used_without_flag() {
    let env = MapEnvResolver::new()
        .with("GROQ_MODEL", "from-env")
        .with("GROQ_BASE_URL", "http://localhost:8080/v1");
    let options = wiring::provider_options(&Config::default(), &env);
    assert_eq!(options.model, Some(ModelName::new("from-env")));
    assert_eq!(options.base_url.as_deref(), Some("http://localhost:8080/v1"));
}

#[test]
fn test_default_model_without_flag_or_env() {
    let options = wiring::provider_options(&Config::default(), &MapEnvResolver::new());
    assert_eq!(options, ProviderOptions::default());
    let provider = create_provider(
        ProviderType::Groq,
        options,
        Some(common::domain::Credential::new(KEY)),
    )
    .unwrap();
    match provider {
        AnyProvider::Groq(p) => assert_eq!(&**p.model(), "llama-3.1-8b-instant"),
        AnyProvider::Echo(_) => panic!("expected groq provider"),
    }
}

#[test]
fn test_log_file_flag_beats_env() {
    let dir = tempfile::tempdir().unwrap();
    let flag_path = dir.path().join("flag.jsonl");
    let env_path = dir.path().join("env.jsonl");
    let config = Config {
        log_file: Some(flag_path.clone()),
        verbose: true,
        ..Default::default()
    };
    let env = MapEnvResolver::new().with("CHATBOT_LOG_FILE", env_path.to_string_lossy());

    let log = wiring::wire_log(&config, &env);
    log.log(&LogRecord::new(LogLevel::Info, "hello")).unwrap();

    assert_eq!(messages(&read_log(&flag_path)), vec!["hello".to_string()]);
    assert!(!env_path.exists());
}

#[test]
fn test_log_file_env_beats_verbose() {
    let dir = tempfile::tempdir().unwrap();
    let env_path: PathBuf = dir.path().join("logs").join("env.jsonl");
    let config = Config {
        verbose: true,
        ..Default::default()
    };
    let env = MapEnvResolver::new().with("CHATBOT_LOG_FILE", env_path.to_string_lossy());

    let log = wiring::wire_log(&config, &env);
    log.log(&LogRecord::new(LogLevel::Info, "hello")).unwrap();

    assert_eq!(messages(&read_log(&env_path)), vec!["hello".to_string()]);
}

#[test]
fn test_turn_logs_lifecycle_and_hides_credential() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("chatbot.jsonl");
    let config = Config {
        log_file: Some(log_path.clone()),
        timeout_secs: Some(5),
        ..base_config(dir.path())
    };
    // 接続できないエンドポイントで失敗させる（ネットワーク不要）
    let env = MapEnvResolver::new()
        .with("GROQ_API_KEY", KEY)
        .with("GROQ_BASE_URL", "http://127.0.0.1:9/v1");

    let (code, output) = run_turn(&config, env, "Hello");

    assert_eq!(code, 0);
    let response = output.json_lines()[0]["response"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(response.starts_with("Sorry, I encountered an error: "));
    assert!(response.contains("127.0.0.1:9"));

    let records = read_log(&log_path);
    assert_eq!(
        messages(&records),
        vec!["command started", "completion failed", "command finished"]
    );
    assert_eq!(records[1]["level"], "warn");
    assert_eq!(records[2]["fields"]["exit_code"], 0);

    let raw = fs::read_to_string(&log_path).unwrap();
    assert!(!raw.contains(KEY));
    assert!(!response.contains(KEY));
}

#[test]
fn test_successful_turn_logs_turn_completed() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("chatbot.jsonl");
    let config = Config {
        log_file: Some(log_path.clone()),
        profile: Some(ProviderName::new("echo")),
        ..base_config(dir.path())
    };

    let (code, output) = run_turn(&config, MapEnvResolver::new(), "ping");

    assert_eq!(code, 0);
    assert_eq!(output.json_lines()[0]["response"], "[echo] ping");
    assert_eq!(
        messages(&read_log(&log_path)),
        vec!["command started", "turn completed", "command finished"]
    );
}

#[test]
fn test_missing_credential_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("chatbot.jsonl");
    let config = Config {
        log_file: Some(log_path.clone()),
        ..base_config(dir.path())
    };

    let (code, output) = run_turn(&config, MapEnvResolver::new(), "Hello");

    assert_eq!(code, 1);
    assert_eq!(
        output.json_lines()[0]["error"],
        "GROQ_API_KEY not found in environment variables"
    );
    let records = read_log(&log_path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "error");
    assert_eq!(
        records[0]["message"],
        "GROQ_API_KEY not found in environment variables"
    );
}
