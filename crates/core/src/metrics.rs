//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream indexer requests (counts, latency)
//! - Response parsing (records produced, counters sanitized)
//! - Smart search strategy (short-circuits, batch post-filter drops)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream requests total by dialect and result.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "anitorrent_upstream_requests_total",
            "Total requests made to upstream indexers",
        ),
        &["dialect", "result"], // result: "success", "failure"
    )
    .unwrap()
});

/// Upstream request duration in seconds.
pub static UPSTREAM_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "anitorrent_upstream_duration_seconds",
            "Duration of upstream indexer requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["dialect"],
    )
    .unwrap()
});

// =============================================================================
// Parsing Metrics
// =============================================================================

/// Canonical records produced by dialect.
pub static RECORDS_PARSED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "anitorrent_records_parsed_total",
            "Total torrent records normalized from upstream payloads",
        ),
        &["dialect"],
    )
    .unwrap()
});

/// Peer counters replaced because they were implausible.
pub static COUNTERS_SANITIZED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "anitorrent_counters_sanitized_total",
        "Total seeder/leecher counters discarded as upstream glitches",
    )
    .unwrap()
});

// =============================================================================
// Strategy Metrics
// =============================================================================

/// Smart searches answered with no upstream request.
pub static SMART_SEARCH_SHORT_CIRCUITS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "anitorrent_smart_search_short_circuits_total",
            "Smart searches that could not be satisfied by the dialect",
        ),
        &["reason"], // "missing_anime_id", "missing_episode_id"
    )
    .unwrap()
});

/// Batch candidates dropped for holding a single file.
pub static BATCH_FILTER_DROPS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "anitorrent_batch_filter_drops_total",
        "Batch search results dropped because they contained a single file",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Upstream
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_DURATION.clone()),
        // Parsing
        Box::new(RECORDS_PARSED.clone()),
        Box::new(COUNTERS_SANITIZED.clone()),
        // Strategy
        Box::new(SMART_SEARCH_SHORT_CIRCUITS.clone()),
        Box::new(BATCH_FILTER_DROPS.clone()),
    ]
}
