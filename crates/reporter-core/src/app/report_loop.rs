//! ReportLoop - start 1 回ぶんの background ループ
//!
//! # フロー
//! 1. remaining == 0 なら終了（各 iteration の前にチェック）
//! 2. remaining を 1 減らす
//! 3. message と新しい remaining を sink に出力
//! 4. interval だけ suspend（wake は握りつぶす）

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::domain::{LoopState, ReportLine, ReporterState, RunId, WakePolicy};
use crate::ports::{Clock, ReportSink};

/// Everything a loop needs besides its own state. Cloned out of the
/// `PeriodicReporter` at start time.
pub(crate) struct LoopContext {
    pub run_id: RunId,
    pub sink: Arc<dyn ReportSink>,
    pub clock: Arc<dyn Clock>,
    pub wake: Arc<Notify>,
    pub interval: Duration,
    pub wake_policy: WakePolicy,
}

/// Drive one run until its state reaches `Terminated`, which is returned.
pub(crate) async fn report_loop(ctx: LoopContext, mut state: ReporterState) -> LoopState {
    debug!(times = state.remaining(), "report loop started");

    while state.loop_state() == LoopState::Running {
        let Some(remaining) = state.tick() else {
            break;
        };
        let line = ReportLine::new(ctx.run_id, state.message(), remaining, ctx.clock.now());

        // sink の失敗で loop は止めない
        if let Err(err) = ctx.sink.emit(&line).await {
            warn!(error = %err, remaining, "failed to emit report line");
        }

        suspend(ctx.interval, ctx.wake_policy, &ctx.wake).await;
    }

    debug!("report loop terminated");
    state.loop_state()
}

/// Wait out one interval. A wake arriving mid-wait is discarded; under
/// `ResumeWait` the original deadline still holds.
async fn suspend(interval: Duration, wake_policy: WakePolicy, wake: &Notify) {
    let deadline = Instant::now() + interval;
    loop {
        tokio::select! {
            () = sleep_until(deadline) => return,
            () = wake.notified() => {
                if wake_policy == WakePolicy::Proceed {
                    return;
                }
            }
        }
    }
}
