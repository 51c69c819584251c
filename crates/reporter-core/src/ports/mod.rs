//! Ports - 抽象化レイヤー
//!
//! report loop が外界に触れる場所（時刻・ID・出力先）を trait にしておき、
//! テストで差し替えられるようにする。

pub mod clock;
pub mod id_generator;
pub mod sink;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{RunIdGenerator, UlidRunIdGenerator};
pub use self::sink::ReportSink;
