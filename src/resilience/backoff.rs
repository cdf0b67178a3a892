//! Linear retry backoff.

use std::time::Duration;

/// Delay before the attempt following failed attempt `attempt` (1-based).
///
/// Grows linearly: with the default 250ms unit the delays are 250ms, 500ms,
/// 750ms, ...
pub fn backoff_delay(attempt: u32, unit: Duration) -> Duration {
    unit.saturating_mul(attempt)
}
