use crate::domain::{Leaderboard, Vote};
use std::borrow::Cow;
use std::fmt::Write;

pub fn leaderboard_csv(board: &Leaderboard) -> String {
    let mut out = String::from("rank,brewery,vote_count,average_rating\n");
    for (i, stat) in board.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{:.1}",
            i + 1,
            field(&stat.brewery.name),
            stat.vote_count,
            stat.average_rating
        );
    }
    out
}

pub fn votes_csv(votes: &[Vote]) -> String {
    let mut out = String::from("submitted_at,voter,brewery,rating\n");
    for vote in votes {
        let submitted_at = vote
            .submitted_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{}",
            submitted_at,
            field(&vote.voter_identity),
            field(&vote.target_name),
            vote.rating
        );
    }
    out
}

fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
