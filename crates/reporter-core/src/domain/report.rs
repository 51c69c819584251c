//! ReportLine - sink に渡す 1 行分の出力

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RunId;

/// One periodic line: the run's message and the counter value right after
/// the decrement.
///
/// Text form is `"<message>, <remaining> times remaining."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub run_id: RunId,
    pub message: String,
    pub remaining: u32,
    pub emitted_at: DateTime<Utc>,
}

impl ReportLine {
    pub fn new(
        run_id: RunId,
        message: impl Into<String>,
        remaining: u32,
        emitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            message: message.into(),
            remaining,
            emitted_at,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} times remaining.", self.message, self.remaining)
    }
}
