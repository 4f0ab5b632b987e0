//! Telemetry metric name constants.
//!
//! Centralised metric names for rotom operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `rotom_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).

/// Total enrichment cache hits.
pub const CACHE_HITS_TOTAL: &str = "rotom_cache_hits_total";

/// Total enrichment cache misses.
pub const CACHE_MISSES_TOTAL: &str = "rotom_cache_misses_total";

/// Total upstream fetches issued on cache misses.
///
/// Labels: `status` ("ok" | "not_found" | "error").
pub const UPSTREAM_REQUESTS_TOTAL: &str = "rotom_upstream_requests_total";

/// Upstream fetch duration in seconds.
pub const UPSTREAM_REQUEST_DURATION_SECONDS: &str = "rotom_upstream_request_duration_seconds";
