//! PokeAPI client.
//!
//! Fetches one Pokémon per call and projects the payload down to the
//! fields this service exposes. The upstream is rate limited and
//! occasionally unavailable; all failure translation happens in one place
//! so the rest of the crate only ever sees the two upstream error kinds.
//!
//! See: <https://pokeapi.co/docs/v2>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::PokemonSource;
use crate::types::{EnrichedPokemon, PokemonStat};
use crate::{Result, RotomError};

/// Default base URL for the PokeAPI REST endpoints.
const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default per-request timeout. A stuck upstream fetch must not hang a
/// team read indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the PokeAPI data service.
#[derive(Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client against the live PokeAPI with the default timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and per-request timeout.
    ///
    /// Timeout expiry surfaces as
    /// [`RotomError::UpstreamUnavailable`](crate::RotomError::UpstreamUnavailable).
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch one Pokémon by its normalized identifier key.
    pub async fn get_pokemon(&self, key: &str) -> Result<EnrichedPokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, key);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RotomError::UpstreamUnavailable(e.to_string()))?;

        Self::handle_response_errors(&response, key)?;

        let payload: PokemonData = response
            .json()
            .await
            .map_err(|e| RotomError::UpstreamUnavailable(e.to_string()))?;

        Ok(payload.project())
    }

    /// Check response status and map to the appropriate error.
    fn handle_response_errors(response: &reqwest::Response, key: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            404 => Err(RotomError::PokemonNotFound(key.to_string())),
            code => Err(RotomError::UpstreamUnavailable(format!(
                "PokeAPI returned status {code}"
            ))),
        }
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch(&self, key: &str) -> Result<EnrichedPokemon> {
        self.get_pokemon(key).await
    }
}

/// Upstream payload subset. Serde discards every field not listed here,
/// which is the whole of the projection guarantee.
#[derive(Deserialize)]
struct PokemonData {
    id: u32,
    name: String,
    types: Vec<TypeSlot>,
    sprites: SpriteSet,
    stats: Vec<StatSlot>,
}

#[derive(Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct SpriteSet {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct StatSlot {
    stat: NamedResource,
    base_stat: i32,
}

impl PokemonData {
    fn project(self) -> EnrichedPokemon {
        EnrichedPokemon {
            id: self.id,
            name: self.name,
            types: self.types.into_iter().map(|t| t.kind.name).collect(),
            sprite: self.sprites.front_default,
            stats: self
                .stats
                .into_iter()
                .map(|s| PokemonStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
        }
    }
}
