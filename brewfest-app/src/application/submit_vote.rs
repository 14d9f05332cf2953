use super::store_error;
use crate::domain::{Rating, Vote, VoteSubmission};
use crate::infrastructure::db::{is_unique_violation, BreweryRepository, VoteRepository};
use crate::infrastructure::security::InputSanitizer;
use brewfest_errors::AppError;

pub struct SubmitVote {
    breweries: BreweryRepository,
    votes: VoteRepository,
}

impl SubmitVote {
    pub fn new(breweries: BreweryRepository, votes: VoteRepository) -> Self {
        Self { breweries, votes }
    }

    pub async fn execute(&self, submission: VoteSubmission) -> Result<Vote, AppError> {
        let voter = InputSanitizer::validate_voter_identity(&submission.voter_identity)?;
        let rating = Rating::new(submission.rating)?;

        let brewery = self
            .breweries
            .find_by_id(submission.target_id)
            .await
            .map_err(store_error)?
            .ok_or(AppError::NotFound)?;

        if self
            .votes
            .exists(&voter, brewery.id)
            .await
            .map_err(store_error)?
        {
            return Err(AppError::AlreadyVoted);
        }

        // The stored name wins over whatever the client sent.
        let vote = Vote::new(voter, brewery.id, brewery.name, rating);

        match self.votes.create(&vote).await {
            Ok(created) => {
                tracing::info!(
                    "Vote {} recorded for {} ({}/10)",
                    created.id,
                    created.target_name,
                    created.rating
                );
                Ok(created)
            }
            // A concurrent submission got in between the check and the insert.
            Err(err) if is_unique_violation(&err) => Err(AppError::AlreadyVoted),
            Err(err) => Err(store_error(err)),
        }
    }
}
