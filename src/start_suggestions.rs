//! Startup helpers for the suggestion server.
//!
//! Configuration comes from the environment:
//! - `SUGGEST_PORT`: listening port (default 3000)
//! - `SUGGEST_CONFIG`: optional path to a JSON [`SuggestionConfig`] file

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use crate::server::{self, AppState, DEFAULT_PORT};
use crate::suggestions::SuggestionConfig;

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "SUGGEST_PORT";

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "SUGGEST_CONFIG";

/// Run the server until it fails.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting search suggestions v{}", env!("CARGO_PKG_VERSION"));

    let state = match initialize() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e:#}");
            return ExitCode::from(1);
        }
    };

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Initialize application state without starting the server.
///
/// # Errors
/// Returns an error if the config cannot be loaded or state creation fails.
pub fn initialize() -> anyhow::Result<Arc<AppState>> {
    let config = load_config(std::env::var(CONFIG_ENV).ok().as_deref())?;
    tracing::info!(
        engines = config.engines.len(),
        max_suggestions = config.max_suggestions,
        cache = config.cache_config.enabled,
        "Suggestion config loaded"
    );

    AppState::new(config).context("failed to create suggestion service")
}

/// Load the config from `path`, or defaults when no path is given.
///
/// # Errors
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&str>) -> anyhow::Result<SuggestionConfig> {
    path.map_or_else(
        || Ok(SuggestionConfig::default()),
        |file| {
            SuggestionConfig::from_json_file(file)
                .with_context(|| format!("failed to load config from {file}"))
        },
    )
}

/// Get the server port from environment or default.
#[must_use]
pub fn get_port() -> u16 {
    parse_port(std::env::var(PORT_ENV).ok().as_deref())
}

/// Parse a port value, falling back to [`DEFAULT_PORT`].
fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some(" 9000 ")), 9000);
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("70000")), DEFAULT_PORT);
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None).ok();
        assert_eq!(
            config.map(|c| c.max_suggestions),
            Some(SuggestionConfig::default().max_suggestions)
        );
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some("/nonexistent/suggest.json")).err();
        assert!(err.is_some_and(|e| e.to_string().contains("/nonexistent/suggest.json")));
    }
}
