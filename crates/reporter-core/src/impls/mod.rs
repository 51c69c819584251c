//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **WriterSink / StdoutSink**: AsyncWrite（標準出力）への出力
//! - **MemorySink**: 開発・テスト用に行を溜める

pub mod memory_sink;
pub mod writer_sink;

// 主要な型を再エクスポート
pub use self::memory_sink::MemorySink;
pub use self::writer_sink::{OutputFormat, StdoutSink, WriterSink};
