//! State - レポーターの状態
//!
//! # 学習ポイント
//! - 所有権ごと task に渡す snapshot（共有 mutable state を持たない）
//! - カウンタは 1 ずつしか減らない

/// ReporterState は 1 回の `start` に対応する message / remaining の組
///
/// `start` 時に作られ、background task に move される。
/// 呼び出し側はこの値への参照を持たないので、並行に書き換えられることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterState {
    message: String,
    remaining: u32,
}

impl ReporterState {
    pub fn new(message: impl Into<String>, times: u32) -> Self {
        Self {
            message: message.into(),
            remaining: times,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current loop state derived from the counter.
    pub fn loop_state(&self) -> LoopState {
        if self.remaining == 0 {
            LoopState::Terminated
        } else {
            LoopState::Running
        }
    }

    /// Advance one iteration.
    ///
    /// Returns the new remaining count, or `None` once the counter has hit
    /// zero. A terminated state never ticks again.
    pub fn tick(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.remaining)
    }
}

/// LoopState は report loop の状態
///
/// # 状態遷移
/// - running → running: remaining を 1 減らして出力、interval だけ待つ
/// - running → terminated: remaining == 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}
