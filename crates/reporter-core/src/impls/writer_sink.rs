//! WriterSink - AsyncWrite に 1 行ずつ書く sink
//!
//! # 学習ポイント
//! - tokio::sync::Mutex で writer を守る（await を跨いでロックを持つため std の Mutex は使わない）
//! - 1 行を 1 回の write_all で書くので、並行 run の行が途中で混ざらない

use std::str::FromStr;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::domain::errors::ReporterError;
use crate::domain::report::ReportLine;
use crate::ports::ReportSink;

/// Line format of a [`WriterSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `"<message>, <remaining> times remaining."`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ReporterError;

    /// `"text"` or `"json"`. Anything else is an error, not a fallback.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ReporterError::InvalidConfig(format!(
                "unknown output format {other:?} (expected \"text\" or \"json\")"
            ))),
        }
    }
}

pub struct WriterSink<W> {
    writer: Mutex<W>,
    format: OutputFormat,
}

/// 本番用: 標準出力に書く sink
pub type StdoutSink = WriterSink<Stdout>;

impl StdoutSink {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(tokio::io::stdout(), format)
    }
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn render(&self, line: &ReportLine) -> Result<String, ReporterError> {
        let mut rendered = match self.format {
            OutputFormat::Text => line.to_string(),
            OutputFormat::Json => serde_json::to_string(line).map_err(ReporterError::Encode)?,
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

#[async_trait]
impl<W> ReportSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, line: &ReportLine) -> Result<(), ReporterError> {
        let rendered = self.render(line)?;

        let mut writer = self.writer.lock().await;
        writer.write_all(rendered.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::RunId;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use ulid::Ulid;

    fn line(message: &str, remaining: u32) -> ReportLine {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        ReportLine::new(RunId::from_ulid(Ulid::new()), message, remaining, at)
    }

    #[tokio::test]
    async fn text_format_writes_one_line_per_emit() {
        let sink = WriterSink::new(Vec::new(), OutputFormat::Text);

        sink.emit(&line("hello", 1)).await.unwrap();
        sink.emit(&line("hello", 0)).await.unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "hello, 1 times remaining.\nhello, 0 times remaining.\n");
    }

    #[tokio::test]
    async fn json_format_writes_json_lines() {
        let sink = WriterSink::new(Vec::new(), OutputFormat::Json);
        let l = line("Some words", 9);

        sink.emit(&l).await.unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert!(written.ends_with('\n'));
        let decoded: ReportLine = serde_json::from_str(written.trim_end()).unwrap();
        assert_eq!(decoded, l);
    }

    #[rstest]
    #[case::text("text", OutputFormat::Text)]
    #[case::json("json", OutputFormat::Json)]
    fn output_format_parses_known_names(#[case] raw: &str, #[case] expected: OutputFormat) {
        assert_eq!(raw.parse::<OutputFormat>().unwrap(), expected);
    }

    #[rstest]
    #[case::unknown("xml")]
    #[case::wrong_case("JSON")]
    #[case::empty("")]
    fn output_format_rejects_unknown_names(#[case] raw: &str) {
        let err = raw.parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, ReporterError::InvalidConfig(_)));
    }

    #[test]
    fn default_format_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        let sink = StdoutSink::stdout(OutputFormat::default());
        assert_eq!(sink.format(), OutputFormat::Text);
    }
}
