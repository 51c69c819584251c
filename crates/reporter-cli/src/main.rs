use std::env::{self, VarError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reporter_core::{OutputFormat, PeriodicReporter, ReporterConfig, StdoutSink};
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_MESSAGE: &str = "Some words";
const DEFAULT_TIMES: u32 = 10;
const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// 起動引数: `reporter-cli [MESSAGE] [TIMES]`
#[derive(Debug)]
struct Args {
    message: String,
    times: u32,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self> {
        let message = raw.next().unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        let times = match raw.next() {
            Some(t) => t
                .parse()
                .with_context(|| format!("TIMES must be a non-negative integer, got {t:?}"))?,
            None => DEFAULT_TIMES,
        };
        Ok(Self { message, times })
    }
}

/// 未設定だけを None 扱いにする。UTF-8 でない値はエラー
fn env_value(key: &str, lookup: Result<String, VarError>) -> Result<Option<String>> {
    match lookup {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => bail!("{key} is not valid UTF-8: {raw:?}"),
    }
}

fn parse_millis(key: &str, raw: Option<String>) -> Result<Option<Duration>> {
    raw.map(|raw| {
        raw.parse()
            .map(Duration::from_millis)
            .with_context(|| format!("{key} must be milliseconds, got {raw:?}"))
    })
    .transpose()
}

fn parse_format(raw: Option<String>) -> Result<OutputFormat> {
    match raw {
        Some(raw) => raw.parse().context("REPORTER_FORMAT"),
        None => Ok(OutputFormat::default()),
    }
}

fn env_millis(key: &str) -> Result<Option<Duration>> {
    parse_millis(key, env_value(key, env::var(key))?)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(env::args().skip(1))?;

    let mut config = ReporterConfig::default();
    if let Some(interval) = env_millis("REPORTER_INTERVAL_MS")? {
        config = config.with_interval(interval);
    }
    let grace = env_millis("REPORTER_GRACE_MS")?.unwrap_or(DEFAULT_GRACE);
    let format = parse_format(env_value("REPORTER_FORMAT", env::var("REPORTER_FORMAT"))?)?;

    println!("Hello World!");

    let reporter = PeriodicReporter::builder()
        .config(config)
        .sink(Arc::new(StdoutSink::stdout(format)))
        .build()
        .context("building reporter")?;

    let run_id = reporter.start(args.message, args.times);
    info!(%run_id, ?grace, "reporter started; exiting after grace period");

    // run の完了は待たない。runtime が落ちると detached task も一緒に消える
    sleep(grace).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<Args> {
        Args::parse(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_match_the_demo() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.message, "Some words");
        assert_eq!(parsed.times, 10);
    }

    #[test]
    fn message_and_times_are_positional() {
        let parsed = args(&["hello", "3"]).unwrap();
        assert_eq!(parsed.message, "hello");
        assert_eq!(parsed.times, 3);
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = parse_format(Some("xml".to_string())).unwrap_err();
        assert!(format!("{err:#}").contains("unknown output format"));

        assert_eq!(parse_format(None).unwrap(), OutputFormat::Text);
        assert_eq!(parse_format(Some("json".to_string())).unwrap(), OutputFormat::Json);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_env_value_is_an_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0x66, 0xff, 0x6f]);
        let err = env_value("REPORTER_INTERVAL_MS", Err(VarError::NotUnicode(raw))).unwrap_err();
        assert!(err.to_string().contains("REPORTER_INTERVAL_MS is not valid UTF-8"));
    }

    #[test]
    fn unset_env_value_is_none() {
        assert!(env_value("REPORTER_GRACE_MS", Err(VarError::NotPresent)).unwrap().is_none());
        assert_eq!(
            env_value("REPORTER_GRACE_MS", Ok("250".to_string())).unwrap(),
            Some("250".to_string())
        );
    }

    #[test]
    fn millis_are_parsed_or_rejected() {
        assert_eq!(
            parse_millis("REPORTER_GRACE_MS", Some("250".to_string())).unwrap(),
            Some(Duration::from_millis(250))
        );
        assert_eq!(parse_millis("REPORTER_GRACE_MS", None).unwrap(), None);

        let err = parse_millis("REPORTER_GRACE_MS", Some("soon".to_string())).unwrap_err();
        assert!(err.to_string().contains("REPORTER_GRACE_MS must be milliseconds"));
    }

    #[test]
    fn negative_times_is_rejected() {
        let err = args(&["hello", "-1"]).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
