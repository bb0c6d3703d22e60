use crate::domain::{ChatOutput, UserText};
use crate::ports::outbound::{
    CompletionClient, CompletionOutcome, InputSource, OutputSink, TranscriptStore,
};
use crate::usecase::turn::TurnProcessor;
use common::domain::SessionId;
use common::error::Error;
use common::llm::Message;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 接続診断で送る固定の発話
pub const CHECK_PROMPT: &str = "Just respond with 'Connection successful!'";

// --- 責務別 Deps（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct ChatDeps {
    pub session: SessionDeps,
    pub model: ModelDeps,
    pub io: IoDeps,
    pub obs: ObsDeps,
}

pub struct SessionDeps {
    pub store: Arc<dyn TranscriptStore>,
    pub session_id: SessionId,
}

pub struct ModelDeps {
    pub client: Arc<dyn CompletionClient>,
}

pub struct IoDeps {
    pub input: Arc<dyn InputSource>,
    pub output: Arc<dyn OutputSink>,
}

pub struct ObsDeps {
    pub log: Arc<dyn Log>,
}

/// chatbot のユースケース（アダプター経由で I/O を行う）
pub struct ChatUseCase {
    deps: ChatDeps,
    turns: TurnProcessor,
}

impl ChatUseCase {
    pub fn new(deps: ChatDeps) -> Self {
        let turns = TurnProcessor::new(
            Arc::clone(&deps.session.store),
            Arc::clone(&deps.model.client),
            Arc::clone(&deps.obs.log),
        );
        Self { deps, turns }
    }

    /// 1 ターン実行: 発話を読み、応答を `{"response": ...}` として 1 行出力する
    ///
    /// `message` が None のときは入力ストリーム全体を読む。
    /// 補完の失敗は代替応答として出力され Ok(0) になる。入出力の失敗だけが Err。
    pub fn run_turn(&self, message: Option<&str>) -> Result<i32, Error> {
        let raw = match message {
            Some(m) => m.to_string(),
            None => self.deps.io.input.read_all()?,
        };
        let user_text = UserText::from_raw(&raw);
        let reply = self
            .turns
            .process_turn(&self.deps.session.session_id, &user_text);
        self.deps.io.output.emit(&ChatOutput::response(reply.content))?;
        Ok(0)
    }

    /// 対話モード: 1 行 1 ターンで EOF まで処理する
    ///
    /// `/history` は現在のトランスクリプト、`/clear` は破棄。空行は無視する。
    pub fn run_interactive(&self) -> Result<i32, Error> {
        let session = &self.deps.session.session_id;
        while let Some(line) = self.deps.io.input.read_line()? {
            let user_text = UserText::from_raw(&line);
            if user_text.is_empty() {
                continue;
            }
            let output = match &*user_text {
                "/history" => ChatOutput::history(self.deps.session.store.snapshot(session)),
                "/clear" => {
                    self.deps.session.store.clear(session);
                    self.log(LogRecord::new(LogLevel::Info, "transcript cleared").kind("turn"));
                    ChatOutput::cleared()
                }
                _ => ChatOutput::response(self.turns.process_turn(session, &user_text).content),
            };
            self.deps.io.output.emit(&output)?;
        }
        Ok(0)
    }

    /// 接続診断: 固定の発話を単独で送り、応答が得られれば成功
    ///
    /// トランスクリプトには記録しない。失敗は致命的エラーとして返す。
    pub fn run_check(&self) -> Result<i32, Error> {
        match self.deps.model.client.complete(&[Message::user(CHECK_PROMPT)]) {
            CompletionOutcome::Reply(reply) => {
                self.log(LogRecord::new(LogLevel::Info, "connection check passed").kind("check"));
                self.deps
                    .io
                    .output
                    .emit(&ChatOutput::check_passed(reply.content))?;
                Ok(0)
            }
            CompletionOutcome::Failed(description) => Err(Error::http(description)),
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.obs.log.log(&record.layer("usecase"));
    }
}
