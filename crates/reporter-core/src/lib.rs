//! reporter-core
//!
//! Background periodic reporter: `start(message, times)` launches a detached
//! task that emits `"<message>, <remaining> times remaining."` once per
//! interval until the counter reaches zero.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（RunId, ReporterState, ReportLine, ReporterConfig, ReporterError）
//! - **ports**: 抽象化レイヤー（Clock, RunIdGenerator, ReportSink）
//! - **app**: アプリケーションロジック（ReporterBuilder, PeriodicReporter, report loop）
//! - **impls**: ports の実装（StdoutSink, MemorySink）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{PeriodicReporter, ReporterBuilder};
pub use domain::{ReportLine, ReporterConfig, ReporterError, RunId, WakePolicy};
pub use impls::{MemorySink, OutputFormat, StdoutSink};
