//! ReporterBuilder - PeriodicReporter の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: interval が 0 なら build() で弾く

use std::sync::Arc;

use tokio::sync::Notify;

use super::reporter::PeriodicReporter;
use crate::domain::{ReporterConfig, ReporterError};
use crate::impls::{OutputFormat, StdoutSink};
use crate::ports::{Clock, ReportSink, RunIdGenerator, SystemClock, UlidRunIdGenerator};

/// ReporterBuilder は PeriodicReporter を構築
///
/// # 使用例
/// ```ignore
/// let reporter = ReporterBuilder::new()
///     .config(ReporterConfig::default().with_interval(Duration::from_millis(500)))
///     .sink(Arc::new(MemorySink::new()))
///     .build()?;
/// ```
///
/// # 既定値
/// - sink: 標準出力（text）
/// - clock: SystemClock
/// - id generator: clock を使う UlidRunIdGenerator
pub struct ReporterBuilder {
    config: ReporterConfig,
    sink: Option<Arc<dyn ReportSink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn RunIdGenerator>>,
}

impl ReporterBuilder {
    pub fn new() -> Self {
        Self {
            config: ReporterConfig::default(),
            sink: None,
            clock: None,
            ids: None,
        }
    }

    pub fn config(mut self, config: ReporterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn RunIdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// # 検証
    /// - config.validate() に通らなければ ReporterError::InvalidConfig
    pub fn build(self) -> Result<PeriodicReporter, ReporterError> {
        self.config.validate()?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let ids: Arc<dyn RunIdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidRunIdGenerator::new(Arc::clone(&clock))),
        };
        let sink: Arc<dyn ReportSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(StdoutSink::stdout(OutputFormat::Text)),
        };

        Ok(PeriodicReporter {
            config: self.config,
            sink,
            clock,
            ids,
            wake: Arc::new(Notify::new()),
        })
    }
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemorySink;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn test_build_with_defaults() {
        let reporter = ReporterBuilder::new().build().unwrap();
        assert_eq!(reporter.config().interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_build_rejects_zero_interval() {
        let config = ReporterConfig::default().with_interval(Duration::ZERO);
        let result = ReporterBuilder::new().config(config).build();
        assert!(matches!(result, Err(ReporterError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_build_uses_injected_clock_for_lines_and_ids() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let sink = Arc::new(MemorySink::new());
        let reporter = ReporterBuilder::new()
            .clock(Arc::new(FixedClock::new(at)))
            .sink(sink.clone())
            .build()
            .unwrap();

        let run_id = reporter.start("hello", 1);
        tokio::time::sleep(Duration::from_secs(2)).await;

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].emitted_at, at);
        assert_eq!((run_id.as_ulid().0 >> 80) as i64, at.timestamp_millis());
    }
}
