//! Logging setup.
//!
//! # Design
//! - One entry point installs a `tracing-subscriber` registry with an
//!   `EnvFilter` built from the configured level.
//! - In the browser, events go through [`ConsoleLayer`] to the developer
//!   console; native builds use the fmt layer.
//! - Formatting of console lines is plain Rust so it is tested natively.

use crate::error::TelemetryError;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when the configured level does not parse.
pub const FALLBACK_LOG_LEVEL: &str = "info";

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Browser developer console.
    Console,
    /// Structured JSON lines.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Console in the browser; pretty or JSON natively depending on the build profile.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Console
        } else if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig<'a> {
    /// Filter directive (e.g. `info`, `reelnotes_ui=debug`).
    pub level: &'a str,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: FALLBACK_LOG_LEVEL,
            format: LogFormat::infer(),
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::SubscriberInstall`] when a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(build_env_filter(config.level));
    let installed = match config.format {
        LogFormat::Console => registry.with(ConsoleLayer::new(console_sink)).try_init(),
        LogFormat::Json => registry
            .with(fmt_layer::layer().json().with_target(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt_layer::layer().with_target(false))
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_LEVEL))
}

/// Where formatted console lines are written.
pub type ConsoleSink = fn(Level, &str);

/// Layer that formats each event into one line and hands it to a sink.
#[derive(Clone, Copy)]
pub struct ConsoleLayer {
    sink: ConsoleSink,
}

impl ConsoleLayer {
    /// Layer writing to `sink`.
    #[must_use]
    pub const fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let metadata = event.metadata();
        let line = format_line(*metadata.level(), metadata.target(), &fields);
        (self.sink)(*metadata.level(), &line);
    }
}

/// Message and key/value fields of one event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldCollector {
    /// The `message` field.
    pub message: String,
    /// Remaining fields in recording order.
    pub fields: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

/// `LEVEL target: message key=value ...`
#[must_use]
pub fn format_line(level: Level, target: &str, fields: &FieldCollector) -> String {
    let mut line = format!("{level} {target}: {}", fields.message);
    for (key, value) in &fields.fields {
        let _ = write!(line, " {key}={value}");
    }
    line
}

#[cfg(target_arch = "wasm32")]
fn console_sink(level: Level, line: &str) {
    if level == Level::ERROR {
        gloo::console::error!(line);
    } else if level == Level::WARN {
        gloo::console::warn!(line);
    } else if level == Level::INFO {
        gloo::console::info!(line);
    } else {
        gloo::console::debug!(line);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn console_sink(level: Level, line: &str) {
    eprintln!("[{level}] {line}");
}
