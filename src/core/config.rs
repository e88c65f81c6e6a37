//! Configuration management for the relay server.
//!
//! All configuration comes from environment variables (with `.env` support
//! via dotenvy, loaded in `main`). The resulting [`AppConfig`] is built once
//! at startup and shared immutably for the life of the process.

use anyhow::{Context, Result};

/// Default upstream base URL when `UPSTREAM_API_BASE` is not set.
pub const DEFAULT_UPSTREAM_API_BASE: &str = "https://api.mistral.ai";

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream provider configuration
    pub upstream: UpstreamConfig,

    /// Server configuration (host, port)
    pub server: ServerConfig,
}

/// Configuration for the single upstream provider.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL for the upstream API, without trailing slash
    pub api_base: String,

    /// API key injected into every outbound request.
    /// Treated as a secret: never logged, never echoed in responses.
    pub api_key: String,
}

/// Server-specific configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6432
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails if `UPSTREAM_API_KEY` is unset or empty: starting without a real
    /// credential would only produce confusing authentication failures from
    /// the upstream on every request.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("UPSTREAM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .context("UPSTREAM_API_KEY environment variable is required")?;

        let api_base = std::env::var("UPSTREAM_API_BASE")
            .ok()
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());

        let port = match std::env::var("PORT") {
            Ok(port_str) => port_str
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", port_str))?,
            Err(_) => default_port(),
        };

        Ok(Self {
            upstream: UpstreamConfig { api_base, api_key },
            server: ServerConfig { host, port },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("UPSTREAM_API_KEY");
        std::env::remove_var("UPSTREAM_API_BASE");
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
    }

    #[test]
    fn test_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 6432);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("UPSTREAM_API_KEY", "sk-test");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.upstream.api_key, "sk-test");
        assert_eq!(config.upstream.api_base, DEFAULT_UPSTREAM_API_BASE);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 6432);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("UPSTREAM_API_KEY", "sk-test");
        std::env::set_var("UPSTREAM_API_BASE", "http://localhost:9000/");
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "8080");

        let config = AppConfig::from_env().unwrap();
        // Trailing slash is trimmed so paths can be appended directly
        assert_eq!(config.upstream.api_base, "http://localhost:9000");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_api_key_fails() {
        clear_env();

        let result = AppConfig::from_env();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("UPSTREAM_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_empty_api_key_fails() {
        clear_env();
        std::env::set_var("UPSTREAM_API_KEY", "   ");

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_fails() {
        clear_env();
        std::env::set_var("UPSTREAM_API_KEY", "sk-test");
        std::env::set_var("PORT", "not-a-port");

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }
}
