//! ReportSink port - 出力先の抽象化
//!
//! # 実装
//! - **StdoutSink**: 標準出力（text / JSON lines）
//! - **MemorySink**: テスト用に行を溜める

use async_trait::async_trait;

use crate::domain::errors::ReporterError;
use crate::domain::report::ReportLine;

/// ReportSink は report loop が出力する 1 行を受け取る
///
/// 複数の run から同時に呼ばれることがある（`Send + Sync`）。
/// 1 回の `emit` で 1 行がまとめて書かれること以外、行の順序は保証しない。
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn emit(&self, line: &ReportLine) -> Result<(), ReporterError>;
}
