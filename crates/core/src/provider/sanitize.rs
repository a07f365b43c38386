//! Sanitization of unreliable upstream peer counters.

use tracing::debug;

use crate::metrics::COUNTERS_SANITIZED;

/// Counters above this value are known upstream glitches.
pub const MAX_PLAUSIBLE_PEERS: i64 = 30_000;

/// Clamp a single counter: negative or implausible values become 0.
pub fn sanitize_counter(value: i64) -> u32 {
    if (0..=MAX_PLAUSIBLE_PEERS).contains(&value) {
        value as u32
    } else {
        debug!(value, "Discarding implausible peer counter");
        COUNTERS_SANITIZED.inc();
        0
    }
}

/// Sanitize a seeders/leechers pair.
pub fn sanitize_counters(seeders: i64, leechers: i64) -> (u32, u32) {
    (sanitize_counter(seeders), sanitize_counter(leechers))
}
