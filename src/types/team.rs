//! Teams: submitted drafts, persisted rows, and enriched read results.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{EnrichedPokemon, PokemonIdentifier};
use crate::{Result, RotomError};

/// Maximum number of members a team can hold.
pub const MAX_TEAM_MEMBERS: usize = 6;

/// A stored team: unique name, ordered members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub members: Vec<PokemonIdentifier>,
}

/// A team as submitted by a caller, before it has an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    pub members: Vec<PokemonIdentifier>,
}

impl TeamDraft {
    /// Validate the draft against the team rules:
    ///
    /// - name must be non-empty
    /// - 1 to [`MAX_TEAM_MEMBERS`] members
    /// - member names non-empty, dex numbers positive
    /// - no duplicate members (judged on the normalized key, so `"Pikachu"`
    ///   and `"pikachu"` collide)
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RotomError::InvalidTeam("name must not be empty".into()));
        }
        if self.members.is_empty() {
            return Err(RotomError::InvalidTeam(
                "team needs at least one member".into(),
            ));
        }
        if self.members.len() > MAX_TEAM_MEMBERS {
            return Err(RotomError::InvalidTeam(format!(
                "at most {MAX_TEAM_MEMBERS} members allowed"
            )));
        }

        let mut seen = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            match member {
                PokemonIdentifier::Name(name) if name.trim().is_empty() => {
                    return Err(RotomError::InvalidTeam(
                        "member names must not be empty".into(),
                    ));
                }
                PokemonIdentifier::Dex(0) => {
                    return Err(RotomError::InvalidTeam(
                        "dex numbers must be positive".into(),
                    ));
                }
                _ => {}
            }
            if !seen.insert(member.key()) {
                return Err(RotomError::InvalidTeam(format!(
                    "duplicate member: {member}"
                )));
            }
        }

        Ok(())
    }
}

/// A team with every member enriched, in the original member order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTeam {
    pub id: i64,
    pub name: String,
    pub members: Vec<EnrichedPokemon>,
}

/// One page of stored teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPage {
    pub data: Vec<Team>,
    pub pagination: Pagination,
}

/// Pagination envelope for team listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}
