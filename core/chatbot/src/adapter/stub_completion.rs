//! テスト用: 決めておいた結果を順に返す CompletionClient と、メモリ上の入出力


#[cfg(test)]
pub use stub::{BrokenInput, MemoryInput, MemoryOutput, StubCompletionClient};
