//! Forwarding engine: the outbound attempt loop.

use std::time::Duration;

use reqwest::StatusCode;

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::resilience::backoff::backoff_delay;

/// Identifying header sent on every outbound attempt.
const USER_AGENT: &str = concat!("http-relay/", env!("CARGO_PKG_VERSION"));

/// Terminal outcome of forwarding one inbound request.
#[derive(Debug)]
pub enum RelayResult {
    /// The upstream answered. Any status counts — a 5xx from the origin is
    /// the origin's answer, not a transport failure, and is never retried.
    Forwarded { status: StatusCode, body: Vec<u8> },

    /// Every attempt failed at the transport level (timeout, connection
    /// error, DNS). Carries the final failure for logging.
    Exhausted { last_cause: reqwest::Error },
}

/// Executes upstream calls with bounded timeouts and linear-backoff retries.
///
/// TLS, connection pooling and redirect policy belong to the underlying
/// client; this type only decides what is sent and how failures are
/// interpreted.
pub struct Forwarder {
    client: reqwest::Client,
    max_retries: u32,
    request_timeout: Duration,
    backoff_unit: Duration,
}

impl Forwarder {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            request_timeout: config.request_timeout,
            backoff_unit: config.backoff_unit,
        })
    }

    /// Fetch `url`, retrying transport failures up to the configured attempt
    /// budget. Sleeps `backoff_unit * attempt` between attempts; no sleep
    /// follows the last one.
    ///
    /// Attempts are strictly sequential. Dropping the returned future (the
    /// caller went away) cancels the in-flight attempt and any remaining
    /// retries.
    pub async fn forward(&self, url: &str) -> RelayResult {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.attempt(url).await {
                Ok((status, body)) => {
                    tracing::debug!(%url, %status, attempt, "Upstream responded");
                    return RelayResult::Forwarded { status, body };
                }
                Err(cause) => {
                    metrics::record_transport_failure();
                    if attempt >= self.max_retries {
                        return RelayResult::Exhausted { last_cause: cause };
                    }
                    let delay = backoff_delay(attempt, self.backoff_unit);
                    tracing::warn!(
                        %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %cause,
                        "Transport failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// One outbound GET with the overall per-attempt deadline. A failure
    /// while reading the body counts as a transport failure too.
    async fn attempt(&self, url: &str) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}
