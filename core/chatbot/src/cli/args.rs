use crate::domain::ChatCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -i / --interactive: 標準入力を 1 行 1 ターンとして処理する
    pub interactive: bool,
    /// --check: 認証情報と接続だけを確認する
    pub check: bool,
    /// -v / --verbose: 構造化ログを stderr に出力する
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub system: Option<String>,
    pub temperature: Option<f32>,
    /// --timeout: リクエスト全体のタイムアウト秒数
    pub timeout_secs: Option<u64>,
    /// --env-file: 読み込む .env（省略時はカレントディレクトリの .env があれば読む）
    pub env_file: Option<PathBuf>,
    /// --log-file: JSONL ログの追記先
    pub log_file: Option<PathBuf>,
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("chatbot")
        .about("Relay one chat turn from stdin to a hosted LLM and print the reply as JSON")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Read one turn per line until EOF, keeping the transcript")
                .action(ArgAction::SetTrue)
                .conflicts_with("check"),
        )
        .arg(
            clap::Arg::new("check")
                .long("check")
                .help("Verify the credential and the connection, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile (groq, echo). Default: groq")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (default: $GROQ_MODEL or llama-3.1-8b-instant)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("system")
                .short('S')
                .long("system")
                .value_name("instruction")
                .help("System instruction sent ahead of the transcript")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("temperature")
                .short('t')
                .long("temperature")
                .value_name("value")
                .help("Sampling temperature")
                .value_parser(value_parser!(f32))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Request timeout in seconds (default: transport default)")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("env-file")
                .long("env-file")
                .value_name("path")
                .help("Load variables from this .env file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append JSONL logs to this file (default: $CHATBOT_LOG_FILE)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Message words (read from stdin when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        interactive: matches.get_flag("interactive"),
        check: matches.get_flag("check"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        system: matches.get_one::<String>("system").cloned(),
        temperature: matches.get_one::<f32>("temperature").copied(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        env_file: matches.get_one::<PathBuf>("env-file").cloned(),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        message_args: matches
            .get_many::<String>("positional")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 引数列から解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(outcome_from_matches(&matches))
}

fn outcome_from_matches(matches: &clap::ArgMatches) -> ParseOutcome {
    match matches.get_one::<Shell>("generate") {
        Some(&shell) => ParseOutcome::GenerateCompletion(shell),
        None => ParseOutcome::Config(matches_to_config(matches)),
    }
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "chatbot", &mut std::io::stdout());
}

/// Config を ChatCommand に変換する（-h は配線前に main が処理する）
pub fn config_to_command(config: &Config) -> ChatCommand {
    if config.check {
        return ChatCommand::Check;
    }
    if config.interactive {
        return ChatCommand::Interactive;
    }
    let message = if config.message_args.is_empty() {
        None
    } else {
        Some(config.message_args.join(" "))
    };
    ChatCommand::Turn { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        match parse_args_from(args.iter().copied()).unwrap() {
            ParseOutcome::Config(c) => c,
            ParseOutcome::GenerateCompletion(_) => panic!("unexpected completion outcome"),
        }
    }

    #[test]
    fn test_config_default() {
        let config = parse(&["chatbot"]);
        assert_eq!(config, Config::default());
        assert_eq!(config_to_command(&config), ChatCommand::Turn { message: None });
    }

    #[test]
    fn test_message_args_are_joined() {
        let config = parse(&["chatbot", "What", "is", "2+2?"]);
        assert_eq!(
            config_to_command(&config),
            ChatCommand::Turn {
                message: Some("What is 2+2?".to_string())
            }
        );
    }

    #[test]
    fn test_options() {
        let config = parse(&[
            "chatbot", "-p", "echo", "-m", "m1", "-S", "Be brief.", "-t", "0.2", "--timeout",
            "30", "--env-file", "x.env", "--log-file", "log.jsonl", "-v",
        ]);
        assert_eq!(config.profile, Some(ProviderName::new("echo")));
        assert_eq!(config.model, Some(ModelName::new("m1")));
        assert_eq!(config.system.as_deref(), Some("Be brief."));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.env_file, Some(PathBuf::from("x.env")));
        assert_eq!(config.log_file, Some(PathBuf::from("log.jsonl")));
        assert!(config.verbose);
    }

    #[test]
    fn test_mode_flags() {
        assert_eq!(config_to_command(&parse(&["chatbot", "--check"])), ChatCommand::Check);
        assert_eq!(
            config_to_command(&parse(&["chatbot", "-i"])),
            ChatCommand::Interactive
        );
        assert!(parse(&["chatbot", "-h", "--check"]).help);
    }

    #[test]
    fn test_check_conflicts_with_interactive() {
        let err = parse_args_from(["chatbot", "--check", "-i"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_invalid_timeout_is_usage_error() {
        let err = parse_args_from(["chatbot", "--timeout", "soon"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_generate_completion() {
        let outcome = parse_args_from(["chatbot", "--generate", "bash"]).unwrap();
        assert!(matches!(outcome, ParseOutcome::GenerateCompletion(Shell::Bash)));
    }
}
