//! Caching subsystem.
//!
//! One cache: [`EnrichmentCache`] — the TTL-bounded map from normalized
//! Pokémon identifiers to enriched records, sitting between team reads and
//! the upstream data service. See the [`enrichment`] module docs for the
//! architecture and the documented miss-race trade-off.

pub mod enrichment;

pub use enrichment::{CacheConfig, EnrichmentCache};
