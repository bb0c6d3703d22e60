//! JSONL で追記する Log 実装
//!
//! 出力先はファイルか stderr。stdout には書かない。

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

fn to_line(record: &LogRecord) -> Result<String, Error> {
    let mut line = serde_json::to_string(record).map_err(|e| Error::json(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io_msg(e.to_string()))?;
            }
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io_msg(format!("{}: {}", self.path.display(), e)))?;
        w.write_all(to_line(record)?.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// stderr へ JSONL を書く Log 実装（-v 指定時）
#[derive(Debug, Clone, Default)]
pub struct StderrJsonLog;

impl Log for StderrJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut err = std::io::stderr().lock();
        err.write_all(to_line(record)?.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// 何も出力しない Log 実装
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
