//! MemorySink - 出力を Vec に溜める sink（テスト・開発用）

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::errors::ReporterError;
use crate::domain::ids::RunId;
use crate::domain::report::ReportLine;
use crate::ports::ReportSink;

/// MemorySink は emit された行を順番どおりに保持する
///
/// ロックは emit / lines の中で完結している（await を跨がない）ので std の Mutex で足りる。
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<ReportLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn lines(&self) -> Vec<ReportLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Lines of a single run, in emission order.
    pub fn lines_for(&self, run_id: RunId) -> Vec<ReportLine> {
        self.lines()
            .into_iter()
            .filter(|line| line.run_id == run_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn emit(&self, line: &ReportLine) -> Result<(), ReporterError> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ulid::Ulid;

    #[tokio::test]
    async fn keeps_lines_in_order_and_filters_by_run() {
        let sink = MemorySink::new();
        let a = RunId::from_ulid(Ulid::new());
        let b = RunId::from_ulid(Ulid::new());

        sink.emit(&ReportLine::new(a, "a", 1, Utc::now())).await.unwrap();
        sink.emit(&ReportLine::new(b, "b", 4, Utc::now())).await.unwrap();
        sink.emit(&ReportLine::new(a, "a", 0, Utc::now())).await.unwrap();

        assert_eq!(sink.len(), 3);
        let remaining: Vec<u32> = sink.lines_for(a).iter().map(|l| l.remaining).collect();
        assert_eq!(remaining, vec![1, 0]);
        assert_eq!(sink.lines_for(b).len(), 1);
    }

    #[test]
    fn starts_empty() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        assert!(sink.lines().is_empty());
    }
}
