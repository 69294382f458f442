//! Booking mock backend with synthetic telemetry.
//!
//! Serves the mock booking endpoints plus the `/_synthetic` routes used by
//! test harnesses to reset state, open sessions and record UI actions.
//!
//! # Environment
//!
//! - `HOST`, `PORT`: HTTP bind address (default `0.0.0.0:8000`)
//! - `METRICS_ENABLED`, `METRICS_HOST`, `METRICS_PORT`: Prometheus exporter
//! - `CORS_PERMISSIVE`: allow any origin (default `true`)
//! - `SESSION_COOKIE_MAX_AGE`: cookie lifetime in seconds
//! - `SYNTHETIC_PREFIX`: mount point of the synthetic routes
//! - `RUST_LOG`: tracing filter

use booking_mock_server::{Config, build_app, metrics::MetricsServer};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env();
    info!(
        addr = %config.server_addr(),
        prefix = %config.synthetic.prefix,
        "Starting booking mock server"
    );

    if config.metrics.enabled {
        start_metrics(&config)?;
    }

    let app = build_app(&config);
    let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_mock=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Install the recorder and spawn the scrape endpoint.
fn start_metrics(config: &Config) -> anyhow::Result<()> {
    let addr = config.metrics_addr().ok_or_else(|| {
        anyhow::anyhow!(
            "invalid metrics address {}:{}",
            config.metrics.host,
            config.metrics.port
        )
    })?;

    let mut server = MetricsServer::new(addr);
    server.start()?;

    tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            error!(error = %e, "Metrics server failed");
        }
    });
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Unable to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
