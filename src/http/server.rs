//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum Router (/health, /relay/{key}/{tail...}, 404 fallback)
//! - Wire up middleware (request ID, tracing, rate limiting)
//! - Compose the relay pipeline: admit → authorize → forward → respond
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{MakeRelayRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::relay::{authorize, target_url, Forwarder, RelayResult};
use crate::security::rate_limit::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new server. Fails only if the outbound client cannot be
    /// constructed.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let forwarder = Forwarder::new(&config)?;
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        let config = Arc::new(config);

        let state = AppState {
            config: config.clone(),
            forwarder: Arc::new(forwarder),
        };

        let router = Self::build_router(state, limiter);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
        // The limiter guards only the relay pipeline; /health and unmatched
        // paths consume no quota.
        let relay_routes = Router::new()
            .route("/relay/{key}", get(relay_root_handler))
            .route("/relay/{key}/{*tail}", get(relay_handler))
            .route_layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ))
            .with_state(state);

        Router::new()
            .route("/health", get(health_handler))
            .merge(relay_routes)
            .fallback(not_found_handler)
            .method_not_allowed_fallback(not_found_handler)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRelayRequestId))
    }

    /// Run the server until the shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream_base,
            "Relay listening"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Relay stopped");
        Ok(())
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Health probe. Bypasses rate limiting and auth entirely.
async fn health_handler() -> &'static str {
    "OK"
}

/// Unmatched path or method.
async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Relay route with an empty path tail (`GET /relay/{key}`).
async fn relay_root_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    run_relay(state, &key, "", query.as_deref(), &headers).await
}

/// Main relay route (`GET /relay/{key}/{tail...}`).
async fn relay_handler(
    State(state): State<AppState>,
    Path((key, tail)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    run_relay(state, &key, &tail, query.as_deref(), &headers).await
}

/// The relay pipeline past the rate limiter: authorize, build the target
/// URL, forward, mirror the outcome.
async fn run_relay(
    state: AppState,
    credential: &str,
    tail: &str,
    raw_query: Option<&str>,
    headers: &HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    if !authorize(&state.config.shared_key, credential) {
        tracing::warn!(request_id = %request_id, "Unauthorized relay request");
        metrics::record_request(401, start);
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let url = target_url(&state.config.upstream_base, tail, raw_query);
    tracing::debug!(request_id = %request_id, %url, "Relaying request");

    match state.forwarder.forward(&url).await {
        RelayResult::Forwarded { status, body } => {
            metrics::record_request(status.as_u16(), start);
            // Mirror status and body verbatim, upstream errors included.
            match Response::builder().status(status).body(Body::from(body)) {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Relay error");
                    metrics::record_request(500, start);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Relay error").into_response()
                }
            }
        }
        RelayResult::Exhausted { last_cause } => {
            tracing::error!(
                request_id = %request_id,
                %url,
                error = %last_cause,
                "Relay failed, retries exhausted"
            );
            metrics::record_request(504, start);
            (StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout via relay").into_response()
        }
    }
}
