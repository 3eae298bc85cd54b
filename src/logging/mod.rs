//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs for cloud monitoring
//! - Sandbox: Colorful, human-readable logs for development

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go. `scan-once` keeps stdout free for its JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Initialize logging for `environment`. `RUST_LOG` overrides the default
/// `info` filter. Calling this twice keeps the first subscriber.
pub fn init_logging(environment: &str, target: LogTarget) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let to_stderr = target == LogTarget::Stderr;

    let result = if is_production(environment) {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        if to_stderr {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer.with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer.with_writer(std::io::stdout))
                .try_init()
        }
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true);
        if to_stderr {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer.with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer.with_writer(std::io::stdout))
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}
