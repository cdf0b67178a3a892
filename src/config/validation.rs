//! Semantic configuration validation.
//!
//! Runs after parsing, before the config is accepted into the system.
//! Returns every violation, not just the first, so a broken deployment can
//! be fixed in one pass.

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("TARGET_BASE must not be empty")]
    EmptyUpstreamBase,

    #[error("TARGET_BASE is not an absolute http(s) URL: {0}")]
    MalformedUpstreamBase(String),

    #[error("MAX_RETRIES must be at least 1")]
    ZeroRetries,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("RATE_LIMIT_POINTS must be at least 1")]
    ZeroRateLimitPoints,
}

/// Validate a parsed [`RelayConfig`].
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream_base.is_empty() {
        errors.push(ValidationError::EmptyUpstreamBase);
    } else {
        match Url::parse(&config.upstream_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::MalformedUpstreamBase(format!(
                "unsupported scheme {:?}",
                url.scheme()
            ))),
            Err(e) => {
                errors.push(ValidationError::MalformedUpstreamBase(e.to_string()))
            }
        }
    }

    if config.max_retries == 0 {
        errors.push(ValidationError::ZeroRetries);
    }
    if config.connect_timeout.is_zero() {
        errors.push(ValidationError::ZeroDuration("CONNECT_TIMEOUT_MS"));
    }
    if config.request_timeout.is_zero() {
        errors.push(ValidationError::ZeroDuration("REQ_TIMEOUT_MS"));
    }
    if config.rate_limit.points == 0 {
        errors.push(ValidationError::ZeroRateLimitPoints);
    }
    if config.rate_limit.window.is_zero() {
        errors.push(ValidationError::ZeroDuration("RATE_LIMIT_DURATION_SECS"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let config = RelayConfig {
            upstream_base: "ftp://example.com".into(),
            ..RelayConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::MalformedUpstreamBase(_)
        ));
    }
}
