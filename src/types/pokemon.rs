//! Pokémon identifiers and enriched attribute records.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A Pokémon lookup identifier: a dex number or a case-insensitive name.
///
/// Round-trips through JSON as a bare number or string (`25` / `"pikachu"`),
/// which is also how team members are persisted. Equality and hashing go
/// through [`key()`](Self::key), so `"Pikachu"` and `"pikachu"` are the same
/// identifier; cache keys and team members share this one normalized domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PokemonIdentifier {
    /// National dex number (positive).
    Dex(u32),
    /// Pokémon name, matched case-insensitively.
    Name(String),
}

impl PokemonIdentifier {
    /// Canonical cache key: the lower-cased string form.
    pub fn key(&self) -> String {
        match self {
            Self::Dex(number) => number.to_string(),
            Self::Name(name) => name.to_lowercase(),
        }
    }
}

impl PartialEq for PokemonIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PokemonIdentifier {}

impl Hash for PokemonIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for PokemonIdentifier {
    /// The identifier as originally given; error messages carry this form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dex(number) => write!(f, "{number}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for PokemonIdentifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PokemonIdentifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u32> for PokemonIdentifier {
    fn from(number: u32) -> Self {
        Self::Dex(number)
    }
}

/// One base stat of an enriched Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: i32,
}

/// Enriched attribute record for one Pokémon.
///
/// Produced only by a successful upstream fetch, never partially
/// constructed. The projection keeps exactly `{id, name, types, sprite,
/// stats}`; everything else the upstream returns is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPokemon {
    pub id: u32,
    pub name: String,
    /// Type names in upstream order.
    pub types: Vec<String>,
    /// Default front sprite URL, when the upstream has one.
    pub sprite: Option<String>,
    /// Base stats in upstream order.
    pub stats: Vec<PokemonStat>,
}
