use super::{export, store_error};
use crate::domain::{Leaderboard, MatchPolicy, Vote};
use crate::infrastructure::db::{is_unique_violation, BreweryRepository, VoteRepository};
use brewfest_errors::AppError;
use std::collections::HashMap;

/// Read side of the dashboard: tallies, exports and the bulk reset.
pub struct TallyVotes {
    breweries: BreweryRepository,
    votes: VoteRepository,
    policy: MatchPolicy,
}

impl TallyVotes {
    pub fn new(breweries: BreweryRepository, votes: VoteRepository, policy: MatchPolicy) -> Self {
        Self {
            breweries,
            votes,
            policy,
        }
    }

    pub async fn leaderboard(&self) -> Result<Leaderboard, AppError> {
        let votes = self.votes.find_all().await.map_err(store_error)?;
        let breweries = self.breweries.find_all().await.map_err(store_error)?;

        Ok(Leaderboard::compute(&votes, &breweries, self.policy))
    }

    pub async fn list_votes(&self) -> Result<Vec<Vote>, AppError> {
        self.votes.find_all().await.map_err(store_error)
    }

    pub async fn reset(&self) -> Result<u64, AppError> {
        let removed = self.votes.delete_all().await.map_err(store_error)?;
        tracing::warn!("All votes cleared ({} removed)", removed);
        Ok(removed)
    }

    pub async fn export_leaderboard_csv(&self) -> Result<String, AppError> {
        Ok(export::leaderboard_csv(&self.leaderboard().await?))
    }

    pub async fn export_votes_csv(&self) -> Result<String, AppError> {
        Ok(export::votes_csv(&self.list_votes().await?))
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Points legacy name-only votes at the brewery carrying that name.
    /// Returns how many votes were updated.
    pub async fn backfill_legacy_targets(&self) -> Result<u64, AppError> {
        let legacy = self.votes.find_without_target().await.map_err(store_error)?;
        if legacy.is_empty() {
            return Ok(0);
        }

        let breweries = self.breweries.find_all().await.map_err(store_error)?;
        let mut by_name = HashMap::with_capacity(breweries.len());
        for brewery in &breweries {
            by_name.entry(brewery.name.as_str()).or_insert(brewery.id);
        }

        let mut updated = 0;
        for vote in &legacy {
            let Some(target_id) = by_name.get(vote.target_name.as_str()) else {
                continue;
            };
            match self.votes.set_target(vote.id, *target_id).await {
                Ok(()) => updated += 1,
                Err(err) if is_unique_violation(&err) => {
                    tracing::warn!(
                        "Vote {} left as legacy: {} already voted for {}",
                        vote.id,
                        vote.voter_identity,
                        vote.target_name
                    );
                }
                Err(err) => return Err(store_error(err)),
            }
        }

        tracing::info!("Backfilled {} of {} legacy votes", updated, legacy.len());
        Ok(updated)
    }
}
