//! RunIdGenerator port - RunId 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidRunIdGenerator**: ULID ベース（本番用）

use crate::domain::ids::RunId;
use crate::ports::Clock;
use ulid::Ulid;

/// RunIdGenerator は start ごとの RunId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（PeriodicReporter が Arc で共有する）
pub trait RunIdGenerator: Send + Sync {
    fn generate(&self) -> RunId;
}

/// UlidRunIdGenerator は Clock の時刻 + ランダム部分で ULID を作る
///
/// FixedClock を渡せば timestamp 部分が決定的になる。
pub struct UlidRunIdGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidRunIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> RunIdGenerator for UlidRunIdGenerator<C> {
    fn generate(&self) -> RunId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        RunId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
