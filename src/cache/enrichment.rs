//! TTL enrichment cache over the upstream Pokémon source.
//!
//! [`EnrichmentCache`] maps a normalized Pokémon identifier to its enriched
//! attribute record. A live entry is returned without any network I/O; a
//! miss or expired entry triggers one upstream fetch from this caller, and
//! only successful fetches are stored. Failures are never cached: a
//! not-found identifier must be retried once it exists upstream, and a
//! transient outage must not poison the key for a whole TTL window.
//!
//! # Expiry
//!
//! Entries live for a fixed TTL (default 120 s) from insertion. Expiry is
//! checked lazily at read time by moka's `time_to_live` policy; nothing
//! sweeps the map proactively.
//!
//! # Concurrent misses
//!
//! `resolve` calls racing past the same missing/expired key each issue
//! their own upstream fetch — there is no per-key single-flight. Under
//! burst concurrency this amplifies upstream load. It is a deliberate
//! simplicity trade-off, safe because fetches for a key are idempotent and
//! the losing insert merely overwrites equal data. Coalescing misses into a
//! shared in-flight future per key (moka's `try_get_with`) is the available
//! strengthening if the amplification ever matters.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use tracing::debug;

use crate::telemetry;
use crate::types::{EnrichedPokemon, PokemonIdentifier};
use crate::upstream::PokemonSource;
use crate::{Result, RotomError};

/// Configuration for the enrichment cache.
///
/// ```rust
/// # use rotom::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(2_000)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 120 seconds.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(120),
        }
    }
}

impl CacheConfig {
    /// Create a new config with the default TTL and capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// TTL cache from normalized identifier keys to enriched records.
///
/// Owns the single upstream-fetch path. Constructed explicitly and handed
/// to [`TeamEnricher`](crate::TeamEnricher) rather than living as ambient
/// global state, so tests build independent instances with scripted
/// sources.
pub struct EnrichmentCache {
    entries: Cache<String, EnrichedPokemon>,
    source: Arc<dyn PokemonSource>,
}

impl EnrichmentCache {
    /// Create a cache resolving misses through `source`.
    pub fn new(config: &CacheConfig, source: Arc<dyn PokemonSource>) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { entries, source }
    }

    /// Resolve an identifier to its enriched record.
    ///
    /// A live entry is returned as-is, with zero upstream I/O. Otherwise
    /// one upstream fetch runs; on success the record is stored under the
    /// normalized key with a fresh TTL.
    /// [`RotomError::PokemonNotFound`] (rewritten to carry the identifier
    /// as originally given) and [`RotomError::UpstreamUnavailable`] pass
    /// through uncached.
    pub async fn resolve(&self, identifier: &PokemonIdentifier) -> Result<EnrichedPokemon> {
        let key = identifier.key();

        if let Some(hit) = self.entries.get(&key).await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            debug!(%key, "enrichment cache hit");
            return Ok(hit);
        }

        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        debug!(%key, "enrichment cache miss, fetching upstream");

        let start = Instant::now();
        let fetched = self.source.fetch(&key).await;
        metrics::histogram!(telemetry::UPSTREAM_REQUEST_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        let status = match &fetched {
            Ok(_) => "ok",
            Err(RotomError::PokemonNotFound(_)) => "not_found",
            Err(_) => "error",
        };
        metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL, "status" => status).increment(1);

        let record = match fetched {
            Ok(record) => record,
            // The source only ever saw the normalized key; the caller gets
            // back the identifier they actually asked for.
            Err(RotomError::PokemonNotFound(_)) => {
                return Err(RotomError::PokemonNotFound(identifier.to_string()));
            }
            Err(err) => return Err(err),
        };

        self.entries.insert(key, record.clone()).await;
        Ok(record)
    }
}
