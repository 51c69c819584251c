//! Domain model (run ids, reporter state, report lines, config, errors).

pub mod config;
pub mod errors;
pub mod ids;
pub mod report;
pub mod state;

pub use self::config::{ReporterConfig, WakePolicy};
pub use self::errors::ReporterError;
pub use self::ids::RunId;
pub use self::report::ReportLine;
pub use self::state::{LoopState, ReporterState};
