mod export;
mod manage_breweries;
mod submit_vote;
mod tally_votes;

pub use export::{leaderboard_csv, votes_csv};
pub use manage_breweries::{LogoSource, ManageBreweries, NewBreweryInput};
pub use submit_vote::SubmitVote;
pub use tally_votes::TallyVotes;

use brewfest_errors::AppError;

pub(crate) fn store_error(err: sea_orm::DbErr) -> AppError {
    tracing::error!("Store error: {}", err);
    AppError::Database(err.to_string())
}
