//! Config - レポーターの設定
//!
//! JSON から読めるようにしてあるが、既定値だけで動く。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::ReporterError;

/// How a report loop reacts to a wake signal that arrives while it is
/// suspended between iterations.
///
/// Either way the wake is swallowed: it is never reported and never logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakePolicy {
    /// Go back to waiting until the original deadline, so consecutive lines
    /// stay a full interval apart.
    #[default]
    ResumeWait,
    /// Abandon the rest of the wait and recheck the counter right away.
    Proceed,
}

/// ReporterConfig
///
/// JSON では interval を `interval_ms`（整数ミリ秒）で書く。
/// コードからは `with_interval` で任意の Duration を渡せる（ミリ秒未満も保持する）。
///
/// ```ignore
/// let config = ReporterConfig::from_json(r#"{"interval_ms": 250}"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Fixed suspension between iterations.
    #[serde(rename = "interval_ms", with = "duration_ms")]
    interval: Duration,

    pub wake_policy: WakePolicy,
}

impl ReporterConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_wake_policy(mut self, wake_policy: WakePolicy) -> Self {
        self.wake_policy = wake_policy;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ReporterError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ReporterError::InvalidConfig(format!("json decode: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReporterError> {
        if self.interval.is_zero() {
            return Err(ReporterError::InvalidConfig(
                "interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            wake_policy: WakePolicy::default(),
        }
    }
}

/// `interval_ms` <-> Duration。ミリ秒で表せない値は serialize 時にエラーにする。
mod duration_ms {
    use std::time::Duration;

    use serde::de::Deserializer;
    use serde::ser::{Error, Serializer};
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if interval.subsec_nanos() % 1_000_000 != 0 {
            return Err(S::Error::custom(format!(
                "interval {interval:?} is not a whole number of milliseconds"
            )));
        }
        let ms = u64::try_from(interval.as_millis())
            .map_err(|_| S::Error::custom("interval does not fit in u64 milliseconds"))?;
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
