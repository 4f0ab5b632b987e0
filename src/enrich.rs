//! Team enrichment pipeline: fan-out member lookups, order-preserving join.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::debug;

use crate::Result;
use crate::cache::EnrichmentCache;
use crate::types::{EnrichedTeam, Team};

/// Resolves every member of a stored team through the enrichment cache.
///
/// Member lookups fan out concurrently — a team holds at most six members,
/// so no limiter is needed — and join back in the original member order.
/// Any member failure fails the whole enrichment; partial teams are never
/// returned. There is no retry logic here or below: a single upstream
/// failure surfaces immediately.
pub struct TeamEnricher {
    cache: Arc<EnrichmentCache>,
}

impl TeamEnricher {
    /// Create an enricher over the given cache.
    pub fn new(cache: Arc<EnrichmentCache>) -> Self {
        Self { cache }
    }

    /// Enrich a stored team.
    ///
    /// Output member order always matches `team.members`, independent of
    /// upstream completion order. When members fail, the first error
    /// observed by the join is returned; ties among simultaneous failures
    /// are unspecified.
    pub async fn enrich(&self, team: &Team) -> Result<EnrichedTeam> {
        debug!(team = %team.name, members = team.members.len(), "enriching team");

        let members =
            try_join_all(team.members.iter().map(|member| self.cache.resolve(member))).await?;

        Ok(EnrichedTeam {
            id: team.id,
            name: team.name.clone(),
            members,
        })
    }
}
