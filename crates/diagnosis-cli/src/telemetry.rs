use crate::config::TelemetryConfig;
use std::env;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}' (from {origin})")]
    Filter {
        directives: String,
        origin: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("could not install the stderr log subscriber")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the stderr subscriber. `RUST_LOG` wins over `DIAG_LOG_LEVEL`.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = resolve_filter(env::var("RUST_LOG").ok(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

/// An empty `RUST_LOG` counts as unset.
fn resolve_filter(rust_log: Option<String>, configured: &str) -> Result<EnvFilter, TelemetryError> {
    let (directives, origin) = match rust_log {
        Some(value) if !value.trim().is_empty() => (value, "RUST_LOG"),
        _ => (configured.to_string(), "DIAG_LOG_LEVEL"),
    };
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::Filter {
        directives,
        origin,
        source,
    })
}
