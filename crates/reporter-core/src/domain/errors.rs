//! Errors - エラー型
//!
//! report loop 自体はエラーを外に返さない（sink の失敗はログに残して続行）。
//! ここに並ぶのは sink / config / builder 側のエラー。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    #[error("report line encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid reporter config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_into_sink_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: ReporterError = io.into();

        assert!(matches!(err, ReporterError::Sink(_)));
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn invalid_config_message_is_kept() {
        let err = ReporterError::InvalidConfig("interval must be greater than zero".into());
        assert_eq!(
            err.to_string(),
            "invalid reporter config: interval must be greater than zero"
        );
    }
}
