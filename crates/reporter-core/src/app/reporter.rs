//! PeriodicReporter - fire-and-forget な background reporter
//!
//! # 学習ポイント
//! - `tokio::spawn` の JoinHandle を捨てると detached task になる
//!   （runtime の shutdown を妨げない、join もされない）
//! - 状態は snapshot として task に move する（呼び出し側と共有しない）

use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{Instrument, debug, info_span};

use super::builder::ReporterBuilder;
use super::report_loop::{LoopContext, report_loop};
use crate::domain::{ReporterConfig, ReporterState, RunId};
use crate::ports::{Clock, ReportSink, RunIdGenerator};

/// PeriodicReporter は `start` ごとに独立した report loop を起動する
///
/// # 使用例
/// ```ignore
/// let reporter = PeriodicReporter::builder()
///     .sink(Arc::new(StdoutSink::stdout(OutputFormat::Text)))
///     .build()?;
/// reporter.start("hello", 3);
/// // => "hello, 2 times remaining." / "hello, 1 ..." / "hello, 0 ..." を 1 秒おきに出力
/// ```
///
/// # 重複 start
/// 実行中の run があっても `start` はそのまま新しい run を起動する。
/// 各 run は自分の ReporterState を持つので状態は競合しない（sink 上で行が交互に並ぶだけ）。
#[derive(Clone)]
pub struct PeriodicReporter {
    pub(super) config: ReporterConfig,
    pub(super) sink: Arc<dyn ReportSink>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ids: Arc<dyn RunIdGenerator>,
    pub(super) wake: Arc<Notify>,
}

impl PeriodicReporter {
    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::new()
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Launch a detached report loop for `(message, times)` and return
    /// immediately.
    ///
    /// The returned [`RunId`] only tags this run's lines and log events; it
    /// cannot be used to wait for or stop the run. `times == 0` starts a
    /// loop that ends without emitting anything.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime, like `tokio::spawn`.
    pub fn start(&self, message: impl Into<String>, times: u32) -> RunId {
        let run_id = self.ids.generate();
        let state = ReporterState::new(message, times);
        let ctx = LoopContext {
            run_id,
            sink: Arc::clone(&self.sink),
            clock: Arc::clone(&self.clock),
            wake: Arc::clone(&self.wake),
            interval: self.config.interval(),
            wake_policy: self.config.wake_policy,
        };

        debug!(%run_id, times, "starting reporter");
        let span = info_span!("report_loop", %run_id);

        // JoinHandle は捨てる（detached）
        drop(tokio::spawn(report_loop(ctx, state).instrument(span)));
        run_id
    }

    /// Deliver a spurious wake to every loop that is currently suspended.
    ///
    /// Loops never treat this as an error; see
    /// [`WakePolicy`](crate::domain::WakePolicy) for how the interval is
    /// affected.
    pub fn wake(&self) {
        self.wake.notify_waiters();
    }
}
