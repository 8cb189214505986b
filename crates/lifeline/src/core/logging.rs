//! Logging setup for the rendering pipeline
//!
//! Structured logging goes through `tracing`. Native builds install a
//! `tracing-subscriber` registry with an `EnvFilter` and one of three `fmt`
//! layouts; wasm builds forward events to the browser console through
//! `tracing-wasm`.
//!
//! # Configuration
//!
//! Level and format are resolved in this order: explicit argument,
//! environment variable, default.
//!
//! - `LIFELINE_LOG_LEVEL` (trace|debug|info|warn|error|off), then `RUST_LOG`
//! - `LIFELINE_LOG_FORMAT` (compact|pretty|json)
//!
//! ```rust,no_run
//! use lifeline::core::logging::init_logging;
//!
//! init_logging(Some("debug"), Some("pretty")).ok();
//! ```
//!
//! Per-module filtering uses the usual directive syntax:
//!
//! ```bash
//! RUST_LOG="info,lifeline::primitives::sequence::layout=trace" lifeline render -i flow.json
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "LIFELINE_LOG_LEVEL";
/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "LIFELINE_LOG_FORMAT";

/// Log output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single line per event
    #[default]
    Compact,
    /// Multi-line, colored, with source locations
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Unknown log format '{}', expected one of {}",
                s,
                LogFormat::variants().join("|")
            )),
        }
    }
}

impl LogFormat {
    /// All accepted format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Pick the log level directive: argument, then env vars, then `info`
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string())
}

/// Pick the log format: argument, then env var, then compact
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name),
        None => Ok(LogFormat::default()),
    }
}

/// Install the global tracing subscriber
///
/// Fails when the format name is unknown or a global subscriber is already
/// installed. Unknown level directives fall back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(format)?;

    #[cfg(target_arch = "wasm32")]
    {
        // The console layer has no format or level knobs of its own.
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfig::default(),
        );
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let directive = resolve_level(level);
        let filter = if directive == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let registry = Registry::default().with(filter);
        match format {
            LogFormat::Compact => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }

        Ok(())
    }
}
