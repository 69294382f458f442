//! Prometheus metrics for the synthetic telemetry subsystem.
//!
//! The core crate emits counters through the `metrics` facade. This module
//! installs the Prometheus recorder behind that facade and serves the
//! rendered exposition text on a separate listener.
//!
//! # Example
//!
//! ```rust,no_run
//! use booking_mock_server::metrics::MetricsServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.start()?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```

use axum::{Router, extract::State, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
    /// Recorder was never installed by this server
    #[error("Metrics server not started")]
    NotStarted,
    /// Failed to bind or serve the HTTP listener
    #[error("Failed to bind metrics server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Prometheus metrics server.
///
/// Exposes metrics on an HTTP endpoint for Prometheus scraping.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a new metrics server.
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Describe the metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Install`] if another recorder is already
    /// installed for this process.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        // Descriptions only attach once a recorder is installed.
        register_metrics();

        self.handle = Some(handle);
        Ok(())
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if server hasn't been started.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }

    /// Serve `GET /metrics` until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::NotStarted`] if [`start`](Self::start) was not
    /// called, or [`MetricsError::Bind`] if the address cannot be bound.
    pub async fn serve(self) -> Result<(), MetricsError> {
        let handle = self.handle.ok_or(MetricsError::NotStarted)?;
        let listener = tokio::net::TcpListener::bind(self.addr).await?;

        tracing::info!(
            addr = %self.addr,
            "Metrics server started - available at http://{}/metrics",
            self.addr
        );

        axum::serve(listener, router(handle)).await?;
        Ok(())
    }
}

/// Router exposing the rendered metrics at `/metrics`.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// Register all metric descriptions.
fn register_metrics() {
    // Synthetic telemetry
    describe_counter!(
        "synthetic_events_logged_total",
        "Total number of synthetic events accepted, labelled by action type"
    );
    describe_counter!(
        "synthetic_events_rejected_total",
        "Total number of log requests rejected for an invalid action type"
    );
    describe_counter!(
        "synthetic_sessions_created_total",
        "Total number of sessions created through new_session"
    );
    describe_counter!("synthetic_resets_total", "Total number of global resets");
    describe_counter!(
        "synthetic_implicit_sessions_total",
        "Total number of sessions created implicitly by logging"
    );
    describe_counter!(
        "synthetic_fallback_events_total",
        "Total number of events logged without a session id"
    );

    // Booking ledger
    describe_counter!("bookings_created_total", "Total number of bookings created");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_server_renders_nothing() {
        let server = MetricsServer::new("127.0.0.1:0".parse().unwrap());
        assert!(server.handle().is_none());
        assert!(server.render().is_none());
    }

    #[tokio::test]
    async fn test_serve_requires_start() {
        let server = MetricsServer::new("127.0.0.1:0".parse().unwrap());
        let result = server.serve().await;
        assert!(matches!(result, Err(MetricsError::NotStarted)));
    }
}
