//! Rotom error types

/// Rotom error types
#[derive(Debug, thiserror::Error)]
pub enum RotomError {
    // Upstream errors
    /// The requested identifier does not exist upstream. Client-correctable:
    /// never cached, so a later-created Pokémon or fixed spelling is retried.
    #[error("pokemon not found: {0}")]
    PokemonNotFound(String),

    /// Transient failure reaching or parsing the upstream (network error,
    /// timeout, non-2xx other than not-found, malformed payload).
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    // Team errors
    #[error("team not found: {0}")]
    TeamNotFound(i64),

    #[error("team name already taken: {0}")]
    DuplicateTeamName(String),

    #[error("invalid team: {0}")]
    InvalidTeam(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<rusqlite::Error> for RotomError {
    fn from(err: rusqlite::Error) -> Self {
        RotomError::Storage(err.to_string())
    }
}

/// Result type alias for Rotom operations
pub type Result<T> = std::result::Result<T, RotomError>;
