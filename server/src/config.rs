//! Configuration management for the booking mock server.
//!
//! Loads configuration from environment variables with sensible defaults.

use booking_mock_web::state::DEFAULT_SESSION_COOKIE_MAX_AGE;
use booking_mock_web::{DEFAULT_SYNTHETIC_PREFIX, RouterOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Prometheus metrics configuration
    pub metrics: MetricsConfig,
    /// Synthetic telemetry configuration
    pub synthetic: SyntheticConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Allow cross-origin requests from anywhere (the frontend dev server)
    pub cors_permissive: bool,
}

/// Metrics exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus exporter
    pub enabled: bool,
    /// Metrics server host (for Prometheus scraping)
    pub host: String,
    /// Metrics server port
    pub port: u16,
}

/// Synthetic telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Mount point of the synthetic routes
    pub prefix: String,
    /// Max-Age of the `session_id` cookie in seconds
    pub session_cookie_max_age: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str, default| parse_or(lookup(key), default);

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(lookup("PORT"), 8000),
                cors_permissive: parsed("CORS_PERMISSIVE", true),
            },
            metrics: MetricsConfig {
                enabled: parsed("METRICS_ENABLED", true),
                host: lookup("METRICS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(lookup("METRICS_PORT"), 9090),
            },
            synthetic: SyntheticConfig {
                prefix: lookup("SYNTHETIC_PREFIX")
                    .unwrap_or_else(|| DEFAULT_SYNTHETIC_PREFIX.to_string()),
                session_cookie_max_age: parse_or(
                    lookup("SESSION_COOKIE_MAX_AGE"),
                    DEFAULT_SESSION_COOKIE_MAX_AGE,
                ),
            },
        }
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Address the metrics server binds to, if it parses.
    #[must_use]
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        format!("{}:{}", self.metrics.host, self.metrics.port)
            .parse()
            .ok()
    }

    /// Router options derived from this configuration.
    #[must_use]
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            synthetic_prefix: self.synthetic.prefix.clone(),
            permissive_cors: self.server.cors_permissive,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
