//! Seam between the enrichment cache and the upstream data service.

use async_trait::async_trait;

use crate::Result;
use crate::types::EnrichedPokemon;

/// A source of enriched Pokémon records.
///
/// The enrichment cache resolves misses through this trait, so tests can
/// inject scripted sources instead of the live
/// [`PokeApiClient`](crate::PokeApiClient).
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// Fetch the record for a normalized identifier key.
    ///
    /// Fails with [`RotomError::PokemonNotFound`](crate::RotomError::PokemonNotFound)
    /// when the upstream does not know the key, and
    /// [`RotomError::UpstreamUnavailable`](crate::RotomError::UpstreamUnavailable)
    /// for any other failure to reach or parse the upstream.
    async fn fetch(&self, key: &str) -> Result<EnrichedPokemon>;
}
