mod brewery;
mod leaderboard;
mod rating;
mod vote;

pub use brewery::{Brewery, BreweryPatch};
pub use leaderboard::{compute_leaderboard, round_one_decimal, BreweryStat, Leaderboard, MatchPolicy};
pub use rating::Rating;
pub use vote::{anonymous_voter_token, Vote, VoteSubmission};
