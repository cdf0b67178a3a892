//! Configuration loading from the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::config::schema::{RateLimitConfig, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Parse {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl RelayConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// Variables and defaults: `PORT` (80), `TARGET_BASE`,
    /// `CONNECT_TIMEOUT_MS` (5000), `REQ_TIMEOUT_MS` (10000), `MAX_RETRIES`
    /// (3), `SHARED_KEY` (empty — relay denies everything),
    /// `RATE_LIMIT_POINTS` (60), `RATE_LIMIT_DURATION_SECS` (60),
    /// `BACKOFF_UNIT_MS` (250), `METRICS_ADDRESS` (unset — exporter off).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Split out
    /// from [`from_env`](Self::from_env) so tests can feed a map instead of
    /// mutating process-global environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = RelayConfig::default();

        let port: u16 = parse_var(&lookup, "PORT", defaults.bind_address.port())?;
        let upstream_base = lookup("TARGET_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.upstream_base);

        let config = RelayConfig {
            bind_address: SocketAddr::from(([0, 0, 0, 0], port)),
            upstream_base,
            connect_timeout: Duration::from_millis(parse_var(
                &lookup,
                "CONNECT_TIMEOUT_MS",
                defaults.connect_timeout.as_millis() as u64,
            )?),
            request_timeout: Duration::from_millis(parse_var(
                &lookup,
                "REQ_TIMEOUT_MS",
                defaults.request_timeout.as_millis() as u64,
            )?),
            max_retries: parse_var(&lookup, "MAX_RETRIES", defaults.max_retries)?,
            shared_key: lookup("SHARED_KEY").unwrap_or_default(),
            backoff_unit: Duration::from_millis(parse_var(
                &lookup,
                "BACKOFF_UNIT_MS",
                defaults.backoff_unit.as_millis() as u64,
            )?),
            rate_limit: RateLimitConfig {
                points: parse_var(&lookup, "RATE_LIMIT_POINTS", 60)?,
                window: Duration::from_secs(parse_var(
                    &lookup,
                    "RATE_LIMIT_DURATION_SECS",
                    60,
                )?),
            },
            metrics_address: lookup("METRICS_ADDRESS")
                .map(|addr| {
                    addr.parse::<SocketAddr>().map_err(|e| ConfigError::Parse {
                        name: "METRICS_ADDRESS",
                        value: addr,
                        reason: e.to_string(),
                    })
                })
                .transpose()?,
        };

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Parse {
            name,
            value: raw,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
