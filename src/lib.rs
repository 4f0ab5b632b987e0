//! Rotom - Pokémon team service with a TTL enrichment cache
//!
//! This crate persists named teams of up to six Pokémon and, on read,
//! enriches each member with live attribute data from PokeAPI. The
//! [`EnrichmentCache`] sits between team reads and the rate-limited
//! upstream, deduplicating lookups within a TTL window and translating
//! upstream failure modes into a small set of caller-visible errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rotom::{CacheConfig, EnrichmentCache, PokeApiClient, TeamDraft, TeamEnricher, TeamStore};
//!
//! #[tokio::main]
//! async fn main() -> rotom::Result<()> {
//!     let store = TeamStore::open("pokedex.db")?;
//!     let cache = EnrichmentCache::new(
//!         &CacheConfig::default(),
//!         Arc::new(PokeApiClient::new()),
//!     );
//!     let enricher = TeamEnricher::new(Arc::new(cache));
//!
//!     let team = store.create(&TeamDraft {
//!         name: "kanto-starters".into(),
//!         members: vec!["bulbasaur".into(), "charmander".into(), "squirtle".into()],
//!     })?;
//!
//!     let enriched = enricher.enrich(&team).await?;
//!     println!("{} has {} members", enriched.name, enriched.members.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod enrich;
pub mod error;
#[cfg(feature = "server")]
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod types;
pub mod upstream;

mod version;

// Re-export main types at crate root
pub use cache::{CacheConfig, EnrichmentCache};
pub use enrich::TeamEnricher;
pub use error::{Result, RotomError};
pub use storage::TeamStore;
pub use upstream::{PokeApiClient, PokemonSource};
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    EnrichedPokemon, EnrichedTeam, Pagination, PokemonIdentifier, PokemonStat, Team, TeamDraft,
    TeamPage,
};
