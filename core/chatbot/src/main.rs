mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use std::sync::Arc;

use adapter::{StdinInput, StdoutSink};
use cli::{config_to_command, parse_args, print_completion, ParseOutcome};
use common::adapter::StdEnvResolver;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{ChatCommand, ChatOutput};
use ports::inbound::UseCaseRunner;
use ports::outbound::OutputSink;
use usecase::app::IoDeps;
use wiring::{wire_chatbot, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, command: ChatCommand) -> Result<i32, Error> {
        let command_name = command.name();
        let _ = self.app.log.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match command {
            ChatCommand::Turn { message } => self.app.chat.run_turn(message.as_deref()),
            ChatCommand::Interactive => self.app.chat.run_interactive(),
            ChatCommand::Check => self.app.chat.run_check(),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.log.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.log.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn main() {
    let output: Arc<dyn OutputSink> = Arc::new(StdoutSink);
    let exit_code = finish(run(Arc::clone(&output)), output.as_ref());
    process::exit(exit_code);
}

/// 実行結果を終了コードにする。致命的エラーは `{"error": ...}` を 1 行出力してから非 0 を返す
fn finish(result: Result<i32, Error>, output: &dyn OutputSink) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            // 出力自体の失敗はもう報告先がない
            let _ = output.emit(&ChatOutput::error(e.to_string()));
            e.exit_code()
        }
    }
}

fn run(output: Arc<dyn OutputSink>) -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // ヘルプは認証情報なしで表示できるよう配線より前に処理する
    if config.help {
        print_help();
        return Ok(0);
    }
    let command = config_to_command(&config);

    let io = IoDeps {
        input: Arc::new(StdinInput),
        output,
    };
    let app = wire_chatbot(&config, Arc::new(StdEnvResolver), io)?;
    Runner { app }.run(command)
}

fn print_usage() {
    eprintln!("Usage: chatbot [options] [message...] (reads stdin when no message is given)");
}

fn print_help() {
    println!("Usage: chatbot [options] [message...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -i, --interactive          Read one turn per line until EOF; /history and /clear are commands");
    println!("  --check                    Verify the credential and the connection, then exit");
    println!("  -p, --profile <profile>    LLM profile (groq, echo). Default: groq");
    println!("  -m, --model <model>        Model name. Default: $GROQ_MODEL or llama-3.1-8b-instant");
    println!("  -S, --system <instruction> System instruction sent ahead of the transcript");
    println!("  -t, --temperature <value>  Sampling temperature");
    println!("  --timeout <secs>           Request timeout in seconds");
    println!("  --env-file <path>          Load variables from this .env file (default: ./.env if present)");
    println!("  --log-file <path>          Append JSONL logs to this file");
    println!("  -v, --verbose              Emit JSONL logs to stderr");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish, ...)");
    println!();
    println!("Environment:");
    println!("  GROQ_API_KEY      API key for the groq profile (required)");
    println!("  GROQ_BASE_URL     Endpoint base URL. Default: https://api.groq.com/openai/v1");
    println!("  GROQ_MODEL        Model name when -m is not given");
    println!("  CHATBOT_LOG_FILE  JSONL log file when --log-file is not given");
    println!();
    println!("Output:");
    println!("  One JSON line on stdout: {{\"response\": ...}} on success, {{\"error\": ...}} on fatal errors (exit 1).");
    println!();
    println!("Examples:");
    println!("  echo 'What is 2+2?' | chatbot");
    println!("  chatbot -p echo Hello there");
}
