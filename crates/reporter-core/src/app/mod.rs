//! App - アプリケーション層
//!
//! ports を組み合わせて periodic reporter を組み立てる。
//!
//! # 主要コンポーネント
//! - **ReporterBuilder**: 構築とワイヤリング（起動時検証つき）
//! - **PeriodicReporter**: `start` で detached な report loop を起動
//! - **report_loop**: decrement → emit → suspend のループ本体

pub mod builder;
pub mod reporter;
mod report_loop;

// 主要な型を再エクスポート
pub use self::builder::ReporterBuilder;
pub use self::reporter::PeriodicReporter;
