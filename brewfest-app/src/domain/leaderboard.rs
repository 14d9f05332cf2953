use super::{Brewery, Vote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

const PODIUM_SIZE: usize = 3;

/// How votes are attributed to breweries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Match on target id, falling back to the denormalized name for votes whose
    /// id is missing or points at no current brewery.
    #[default]
    IdOrLegacyName,
    IdOnly,
}

impl MatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IdOrLegacyName => "id-or-name",
            Self::IdOnly => "id-only",
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id-or-name" | "id-or-legacy-name" => Ok(Self::IdOrLegacyName),
            "id-only" => Ok(Self::IdOnly),
            other => Err(format!("unknown vote match policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreweryStat {
    pub brewery: Brewery,
    pub vote_count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub stats: Vec<BreweryStat>,
    pub total_votes: usize,
    pub overall_average: f64,
}

impl Leaderboard {
    pub fn compute(votes: &[Vote], breweries: &[Brewery], policy: MatchPolicy) -> Self {
        let rating_sum: u64 = votes.iter().map(|v| v.rating.value() as u64).sum();

        Self {
            stats: compute_leaderboard(votes, breweries, policy),
            total_votes: votes.len(),
            overall_average: mean_rounded(rating_sum, votes.len()),
        }
    }

    pub fn podium(&self) -> &[BreweryStat] {
        &self.stats[..self.stats.len().min(PODIUM_SIZE)]
    }

    pub fn entries(&self) -> &[BreweryStat] {
        &self.stats
    }

    /// Votes attributed to some current brewery.
    pub fn attributed_votes(&self) -> usize {
        self.stats.iter().map(|s| s.vote_count).sum()
    }
}

/// Ranks breweries by average rating, then vote count, keeping input order on ties.
pub fn compute_leaderboard(
    votes: &[Vote],
    breweries: &[Brewery],
    policy: MatchPolicy,
) -> Vec<BreweryStat> {
    let mut by_id = HashMap::with_capacity(breweries.len());
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(breweries.len());
    for (idx, brewery) in breweries.iter().enumerate() {
        by_id.insert(brewery.id, idx);
        by_name.entry(brewery.name.as_str()).or_insert(idx);
    }

    let mut tallies = vec![(0usize, 0u64); breweries.len()];
    for vote in votes {
        let by_target_id = vote.target_id.and_then(|id| by_id.get(&id).copied());
        let target = match (by_target_id, policy) {
            (Some(idx), _) => Some(idx),
            (None, MatchPolicy::IdOrLegacyName) => by_name.get(vote.target_name.as_str()).copied(),
            (None, MatchPolicy::IdOnly) => None,
        };

        if let Some(idx) = target {
            tallies[idx].0 += 1;
            tallies[idx].1 += vote.rating.value() as u64;
        }
    }

    let mut stats: Vec<BreweryStat> = breweries
        .iter()
        .zip(tallies)
        .map(|(brewery, (count, sum))| BreweryStat {
            brewery: brewery.clone(),
            vote_count: count,
            average_rating: mean_rounded(sum, count),
        })
        .collect();

    // sort_by is stable, so full ties keep input order
    stats.sort_by(|a, b| {
        b.average_rating
            .total_cmp(&a.average_rating)
            .then_with(|| b.vote_count.cmp(&a.vote_count))
    });

    stats
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean_rounded(sum: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_one_decimal(sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;

    fn brewery(name: &str) -> Brewery {
        Brewery::new(
            name.to_string(),
            format!("{} description", name),
            "https://maps.example.com/booth".to_string(),
            "https://img.example.com/logo.png".to_string(),
        )
    }

    fn vote(voter: &str, target: &Brewery, rating: i32) -> Vote {
        Vote::new(
            voter.to_string(),
            target.id,
            target.name.clone(),
            Rating::new(rating).unwrap(),
        )
    }

    fn legacy_vote(voter: &str, name: &str, rating: i32) -> Vote {
        Vote {
            target_id: None,
            target_name: name.to_string(),
            ..Vote::new(
                voter.to_string(),
                uuid::Uuid::nil(),
                name.to_string(),
                Rating::new(rating).unwrap(),
            )
        }
    }

    fn names(stats: &[BreweryStat]) -> Vec<&str> {
        stats.iter().map(|s| s.brewery.name.as_str()).collect()
    }

    #[test]
    fn test_reference_example() {
        let (a, b, c) = (brewery("A"), brewery("B"), brewery("C"));
        let votes = vec![vote("u1", &a, 8), vote("u2", &a, 6), vote("u3", &b, 9)];

        let stats = compute_leaderboard(&votes, &[a, b, c], MatchPolicy::default());

        assert_eq!(names(&stats), vec!["B", "A", "C"]);
        assert_eq!((stats[0].average_rating, stats[0].vote_count), (9.0, 1));
        assert_eq!((stats[1].average_rating, stats[1].vote_count), (7.0, 2));
        assert_eq!((stats[2].average_rating, stats[2].vote_count), (0.0, 0));
    }

    #[test]
    fn test_no_votes_gives_zero_stats() {
        let breweries = vec![brewery("A"), brewery("B")];
        let board = Leaderboard::compute(&[], &breweries, MatchPolicy::default());

        assert_eq!(board.total_votes, 0);
        assert_eq!(board.overall_average, 0.0);
        for stat in board.entries() {
            assert_eq!(stat.vote_count, 0);
            assert_eq!(stat.average_rating, 0.0);
        }
        assert_eq!(names(board.entries()), vec!["A", "B"]);
    }

    #[test]
    fn test_ties_broken_by_vote_count_then_input_order() {
        let (a, b, c, d) = (brewery("A"), brewery("B"), brewery("C"), brewery("D"));
        let votes = vec![
            vote("u1", &a, 8),
            vote("u1", &b, 8),
            vote("u2", &b, 8),
            vote("u1", &c, 8),
            vote("u1", &d, 8),
        ];

        let stats = compute_leaderboard(&votes, &[a, b, c, d], MatchPolicy::default());

        assert_eq!(names(&stats), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_average_uses_one_decimal() {
        let a = brewery("A");
        let votes = vec![vote("u1", &a, 7), vote("u2", &a, 8), vote("u3", &a, 8)];

        let board = Leaderboard::compute(&votes, &[a], MatchPolicy::default());

        assert_eq!(board.entries()[0].average_rating, 7.7);
        assert_eq!(board.overall_average, 7.7);
    }

    #[test]
    fn test_ranking_compares_rounded_averages() {
        // X averages 7.71 over 7 votes, Y exactly 7.7 over 10; both show 7.7
        let (x, y) = (brewery("X"), brewery("Y"));
        let mut votes = Vec::new();
        for (i, rating) in [8, 8, 8, 8, 8, 7, 7].iter().enumerate() {
            votes.push(vote(&format!("u{}", i), &x, *rating));
        }
        for (i, rating) in [8, 8, 8, 8, 8, 8, 8, 7, 7, 7].iter().enumerate() {
            votes.push(vote(&format!("u{}", i), &y, *rating));
        }

        let stats = compute_leaderboard(&votes, &[x, y], MatchPolicy::default());

        assert_eq!(stats[0].average_rating, 7.7);
        assert_eq!(stats[1].average_rating, 7.7);
        assert_eq!(names(&stats), vec!["Y", "X"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let breweries: Vec<Brewery> = ["A", "B", "C", "D", "E"].iter().map(|n| brewery(n)).collect();
        let votes: Vec<Vote> = breweries
            .iter()
            .enumerate()
            .flat_map(|(i, b)| (0..i).map(move |u| vote(&format!("u{}", u), b, 5)))
            .collect();

        let first = compute_leaderboard(&votes, &breweries, MatchPolicy::default());
        let second = compute_leaderboard(&votes, &breweries, MatchPolicy::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_legacy_votes_match_by_name() {
        let (a, b) = (brewery("Sak Pub"), brewery("Fuzzy Logic"));
        let votes = vec![legacy_vote("u1", "Sak Pub", 6), vote("u2", &a, 10)];

        let stats = compute_leaderboard(&votes, &[a, b.clone()], MatchPolicy::IdOrLegacyName);
        assert_eq!(stats[0].brewery.name, "Sak Pub");
        assert_eq!(stats[0].vote_count, 2);
        assert_eq!(stats[0].average_rating, 8.0);

        let stats = compute_leaderboard(&votes, &[stats[0].brewery.clone(), b], MatchPolicy::IdOnly);
        assert_eq!(stats[0].vote_count, 1);
        assert_eq!(stats[0].average_rating, 10.0);
    }

    #[test]
    fn test_dangling_id_falls_back_to_name() {
        // the brewery was deleted and re-created under the same name
        let deleted = brewery("Sak Pub");
        let current = brewery("Sak Pub");
        let votes = vec![vote("u1", &deleted, 9)];

        let board = Leaderboard::compute(&votes, &[current.clone()], MatchPolicy::IdOrLegacyName);
        assert_eq!(board.entries()[0].brewery.id, current.id);
        assert_eq!(board.entries()[0].vote_count, 1);
        assert_eq!(board.entries()[0].average_rating, 9.0);

        let board = Leaderboard::compute(&votes, &[current], MatchPolicy::IdOnly);
        assert_eq!(board.entries()[0].vote_count, 0);
        assert_eq!(board.attributed_votes(), 0);
        assert_eq!(board.total_votes, 1);
    }

    #[test]
    fn test_vote_counted_once_when_id_and_name_disagree() {
        let (a, b) = (brewery("A"), brewery("B"));
        let mut stray = vote("u1", &a, 9);
        stray.target_name = "B".to_string();

        let board = Leaderboard::compute(&[stray], &[a, b], MatchPolicy::IdOrLegacyName);

        assert_eq!(board.attributed_votes(), 1);
        assert_eq!(board.entries()[0].brewery.name, "A");
    }

    #[test]
    fn test_votes_for_deleted_brewery_are_not_counted() {
        let (a, b) = (brewery("A"), brewery("B"));
        let votes = vec![vote("u1", &a, 9), vote("u2", &b, 4)];

        let board = Leaderboard::compute(&votes, &[b], MatchPolicy::default());

        assert_eq!(names(board.entries()), vec!["B"]);
        assert_eq!(board.attributed_votes(), 1);
        assert!(board.attributed_votes() <= board.total_votes);
        assert_eq!(board.total_votes, 2);
        assert_eq!(board.overall_average, 6.5);
    }

    #[test]
    fn test_podium_is_first_three() {
        let breweries: Vec<Brewery> = ["A", "B", "C", "D"].iter().map(|n| brewery(n)).collect();
        let votes = vec![
            vote("u", &breweries[3], 10),
            vote("u", &breweries[2], 9),
            vote("u", &breweries[1], 8),
            vote("u", &breweries[0], 7),
        ];

        let board = Leaderboard::compute(&votes, &breweries, MatchPolicy::default());

        assert_eq!(names(board.podium()), vec!["D", "C", "B"]);
        assert_eq!(board.entries().len(), 4);
        assert_eq!(Leaderboard::compute(&[], &breweries[..2], MatchPolicy::default()).podium().len(), 2);
    }

    #[test]
    fn test_match_policy_parse() {
        assert_eq!("id-only".parse::<MatchPolicy>().unwrap(), MatchPolicy::IdOnly);
        assert_eq!(" ID-OR-NAME ".parse::<MatchPolicy>().unwrap(), MatchPolicy::IdOrLegacyName);
        assert!("by-vibes".parse::<MatchPolicy>().is_err());
    }
}
