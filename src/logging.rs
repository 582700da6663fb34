//! Logging setup for the CLI.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. The CLI installs one here, writing to stderr so
//! that decoded output on stdout stays clean.
//!
//! The level comes from `--log-level`, then `ASCIIMAGE_LOG`, then `RUST_LOG`,
//! and defaults to `warn`. Standard filter directives work, e.g.
//! `ASCIIMAGE_LOG="asciimage::ir::classify=trace"`.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::error::AsciimageError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ASCIIMAGE_LOG";

/// Log format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

impl FromStr for LogFormat {
    type Err = AsciimageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(AsciimageError::Logging(format!(
                "unknown log format '{}' (supported: {})",
                s,
                Self::variants().join(", ")
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Builds the level filter from an explicit directive or the environment.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: LogFormat) -> Result<(), AsciimageError> {
    let filter = build_filter(level);
    let registry = Registry::default().with(filter);

    let result = match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_span_events(FmtSpan::NONE),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| AsciimageError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_format_display_roundtrips() {
        for name in LogFormat::variants() {
            let format = LogFormat::from_str(name).unwrap();
            assert_eq!(format.to_string(), *name);
        }
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        let filter = build_filter(Some("asciimage::ir=trace"));
        assert!(filter.to_string().contains("asciimage::ir=trace"));
    }
}
