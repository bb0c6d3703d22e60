//! 標準入出力の InputSource / OutputSink 実装

use crate::domain::ChatOutput;
use crate::ports::outbound::{InputSource, OutputSink};
use common::error::Error;
use std::io::{self, BufRead, Read, Write};

/// 標準入力から発話を読む
#[derive(Debug, Clone, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_all(&self) -> Result<String, Error> {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
        Ok(buf)
    }

    fn read_line(&self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// 結果 JSON を 1 行ずつ標準出力へ書く
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&self, output: &ChatOutput) -> Result<(), Error> {
        let line = serde_json::to_string(output)
            .map_err(|e| Error::json(format!("Failed to serialize output: {}", e)))?;
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)
            .and_then(|_| out.flush())
            .map_err(|e| Error::io_msg(format!("Failed to write stdout: {}", e)))
    }
}
