//! HTTP→HTTPS forward relay.
//!
//! Binds a plaintext listener and forwards authorized `GET
//! /relay/{key}/{tail...}` requests to the single configured HTTPS upstream,
//! retrying transport failures with linear backoff. Configured entirely via
//! environment variables; see [`config::loader`](http_relay::config::loader).

use tokio::net::TcpListener;

use http_relay::config::RelayConfig;
use http_relay::http::HttpServer;
use http_relay::lifecycle::Shutdown;
use http_relay::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    tracing::info!("http-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let config = RelayConfig::from_env()?;

    tracing::info!(
        bind_address = %config.bind_address,
        upstream = %config.upstream_base,
        max_retries = config.max_retries,
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        rate_limit_points = config.rate_limit.points,
        "Configuration loaded"
    );

    if config.shared_key.is_empty() {
        tracing::warn!("SHARED_KEY is empty; every relay request will be denied");
    }

    if let Some(addr) = config.metrics_address {
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(config.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
