//! Fixed-window per-IP rate limiting middleware.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::config::schema::RateLimitConfig;
use crate::observability::metrics;

/// Per-identity admission window.
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window rate limiter keyed by client IP.
///
/// DashMap shards the table, so admission checks for different identities
/// proceed independently while checks for the same identity serialize on its
/// entry guard.
pub struct RateLimiter {
    windows: DashMap<IpAddr, Window>,
    points: u32,
    window: std::time::Duration,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            points: config.points,
            window: config.window,
        }
    }

    /// Admit or deny one request for `identity`.
    ///
    /// A lapsed window is reset in place on the next admission, which doubles
    /// as lazy eviction: stale entries never admit beyond a fresh window's
    /// quota.
    pub fn admit(&self, identity: IpAddr) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(identity).or_insert_with(|| Window {
            count: 0,
            reset_at: now + self.window,
        });

        if now >= entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.points
    }
}

/// Middleware gating the relay pipeline on the per-IP quota.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if limiter.admit(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client = %addr.ip(), "Rate limit exceeded");
        metrics::record_rate_limited();
        let mut response = Response::new(Body::from("Too Many Requests"));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(last_octet: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last_octet])
    }

    #[test]
    fn denies_once_quota_is_spent() {
        let limiter = RateLimiter::new(RateLimitConfig {
            points: 3,
            window: Duration::from_secs(60),
        });
        for _ in 0..3 {
            assert!(limiter.admit(client(1)));
        }
        assert!(!limiter.admit(client(1)));
        assert!(!limiter.admit(client(1)));
    }

    #[test]
    fn identities_do_not_share_quota() {
        let limiter = RateLimiter::new(RateLimitConfig {
            points: 1,
            window: Duration::from_secs(60),
        });
        assert!(limiter.admit(client(1)));
        assert!(!limiter.admit(client(1)));
        assert!(limiter.admit(client(2)));
    }

    #[test]
    fn fresh_window_admits_again_after_expiry() {
        let limiter = RateLimiter::new(RateLimitConfig {
            points: 1,
            window: Duration::from_millis(30),
        });
        assert!(limiter.admit(client(1)));
        assert!(!limiter.admit(client(1)));
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.admit(client(1)));
    }
}
