use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{Config, LogFormat};

/// Pick the filter directive: `RUST_LOG` when set, the configured filter otherwise.
fn build_filter(rust_log: Option<&str>, log_filter: &str) -> Result<EnvFilter> {
    match rust_log {
        Some(directive) => {
            EnvFilter::try_new(directive).context("RUST_LOG is not a valid tracing filter directive")
        }
        None => EnvFilter::try_new(log_filter)
            .context("LOG_FILTER is not a valid tracing filter directive"),
    }
}

/// Install the global tracing subscriber.
pub fn init(config: &Config) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(rust_log.as_deref(), &config.log_filter)?;

    let registry = Registry::default().with(env_filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("Failed to initialize tracing subscriber")
}
