//! Logging setup
//!
//! Store operations log through `tracing`; a UI shell calls [`init_tracing`]
//! once at startup to get them on stderr.

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `config.filter`.
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, env_directives.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Directives from the environment win when set and parseable.
fn build_filter(config: &LoggingConfig, env_directives: Option<&str>) -> Result<EnvFilter> {
    let from_env = env_directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    if let Some(filter) = from_env {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.filter)
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", config.filter, e))
}
