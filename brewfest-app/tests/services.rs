//! Service-level flows through `AppContext`.

mod common;

use brewfest_app::application::{LogoSource, NewBreweryInput};
use brewfest_app::domain::{BreweryPatch, Rating, Vote, VoteSubmission};
use brewfest_app::infrastructure::image_host::LogoUpload;
use brewfest_app::AppContext;
use brewfest_errors::AppError;
use common::{insert_brewery, repositories, setup_context};
use uuid::Uuid;

fn new_brewery(name: &str) -> NewBreweryInput {
    NewBreweryInput {
        name: name.to_string(),
        description: "Hazy IPAs and a sour or two".to_string(),
        location_url: "https://maps.google.com/?q=brewery".to_string(),
        logo: LogoSource::Url("https://img.example.com/logo.png".to_string()),
    }
}

fn submission(voter: &str, target_id: Uuid, rating: i32) -> VoteSubmission {
    VoteSubmission {
        voter_identity: voter.to_string(),
        target_id,
        target_name: None,
        rating,
    }
}

async fn vote(ctx: &AppContext, voter: &str, target_id: Uuid, rating: i32) -> Result<Vote, AppError> {
    ctx.submit_vote.execute(submission(voter, target_id, rating)).await
}

#[tokio::test]
async fn duplicate_vote_is_rejected_and_store_grows_by_one() {
    let (ctx, db) = setup_context().await;
    let (_, votes) = repositories(&db);
    let brewery = ctx.manage_breweries.create(new_brewery("Sak Pub")).await.unwrap();

    let first = vote(&ctx, "alice", brewery.id, 8).await.unwrap();
    assert_eq!(first.target_id, Some(brewery.id));
    assert_eq!(first.target_name, "Sak Pub");

    let second = vote(&ctx, "alice", brewery.id, 2).await;
    assert_eq!(second.unwrap_err(), AppError::AlreadyVoted);
    assert_eq!(votes.count().await.unwrap(), 1);
}

#[tokio::test]
async fn vote_validation() {
    let (ctx, _db) = setup_context().await;
    let brewery = ctx.manage_breweries.create(new_brewery("Sak Pub")).await.unwrap();

    for rating in [0, 11, -3] {
        let err = vote(&ctx, "alice", brewery.id, rating).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "rating {}", rating);
    }

    let err = vote(&ctx, "   ", brewery.id, 5).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = vote(&ctx, "alice", Uuid::new_v4(), 5).await.unwrap_err();
    assert_eq!(err, AppError::NotFound);
}

#[tokio::test]
async fn leaderboard_ranks_and_rounds() {
    let (ctx, _db) = setup_context().await;
    let a = ctx.manage_breweries.create(new_brewery("A")).await.unwrap();
    let b = ctx.manage_breweries.create(new_brewery("B")).await.unwrap();
    let c = ctx.manage_breweries.create(new_brewery("C")).await.unwrap();

    vote(&ctx, "u1", a.id, 8).await.unwrap();
    vote(&ctx, "u2", a.id, 9).await.unwrap();
    vote(&ctx, "u1", b.id, 10).await.unwrap();
    vote(&ctx, "u1", c.id, 7).await.unwrap();
    vote(&ctx, "u2", c.id, 8).await.unwrap();
    vote(&ctx, "u3", c.id, 8).await.unwrap();

    let board = ctx.tally_votes.leaderboard().await.unwrap();
    let ranked: Vec<_> = board
        .entries()
        .iter()
        .map(|s| (s.brewery.name.as_str(), s.vote_count, s.average_rating))
        .collect();

    assert_eq!(ranked, vec![("B", 1, 10.0), ("A", 2, 8.5), ("C", 3, 7.7)]);
    assert_eq!(board.total_votes, 6);
    assert_eq!(board.overall_average, 8.3);
}

#[tokio::test]
async fn deleted_brewery_disappears_from_leaderboard() {
    let (ctx, _db) = setup_context().await;
    let keep = ctx.manage_breweries.create(new_brewery("Keep")).await.unwrap();
    let gone = ctx.manage_breweries.create(new_brewery("Gone")).await.unwrap();
    vote(&ctx, "alice", keep.id, 6).await.unwrap();
    vote(&ctx, "alice", gone.id, 10).await.unwrap();

    ctx.manage_breweries.delete(gone.id).await.unwrap();

    let board = ctx.tally_votes.leaderboard().await.unwrap();
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].brewery.id, keep.id);
    assert_eq!(board.attributed_votes(), 1);
    assert_eq!(board.total_votes, 2);

    assert_eq!(
        ctx.manage_breweries.delete(gone.id).await.unwrap_err(),
        AppError::NotFound
    );
}

#[tokio::test]
async fn reset_zeroes_every_count() {
    let (ctx, _db) = setup_context().await;
    let a = ctx.manage_breweries.create(new_brewery("A")).await.unwrap();
    let b = ctx.manage_breweries.create(new_brewery("B")).await.unwrap();
    vote(&ctx, "u1", a.id, 5).await.unwrap();
    vote(&ctx, "u2", b.id, 9).await.unwrap();

    assert_eq!(ctx.tally_votes.reset().await.unwrap(), 2);

    let board = ctx.tally_votes.leaderboard().await.unwrap();
    assert_eq!(board.entries().len(), 2);
    assert!(board.entries().iter().all(|s| s.vote_count == 0 && s.average_rating == 0.0));
    assert_eq!(board.total_votes, 0);

    // the same voter may vote again after a reset
    vote(&ctx, "u1", a.id, 7).await.unwrap();
}

#[tokio::test]
async fn brewery_update_is_partial_and_validated() {
    let (ctx, _db) = setup_context().await;
    let brewery = ctx.manage_breweries.create(new_brewery("Sak Pub")).await.unwrap();

    let patch = BreweryPatch {
        description: Some("Now with a taproom".to_string()),
        ..Default::default()
    };
    let updated = ctx
        .manage_breweries
        .update(brewery.id, patch, None)
        .await
        .unwrap();
    assert_eq!(updated.name, "Sak Pub");
    assert_eq!(updated.description, "Now with a taproom");

    let bad = BreweryPatch {
        location_url: Some("not a url".to_string()),
        ..Default::default()
    };
    let err = ctx.manage_breweries.update(brewery.id, bad, None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = ctx
        .manage_breweries
        .update(Uuid::new_v4(), BreweryPatch::default(), None)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::NotFound);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (ctx, _db) = setup_context().await;

    let mut input = new_brewery("  ");
    assert!(matches!(
        ctx.manage_breweries.create(input.clone()).await.unwrap_err(),
        AppError::Validation(_)
    ));

    input.name = "Sak Pub".to_string();
    input.logo = LogoSource::Url("ftp://img.example.com/logo.png".to_string());
    assert!(matches!(
        ctx.manage_breweries.create(input).await.unwrap_err(),
        AppError::Validation(_)
    ));

    assert!(ctx.manage_breweries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn upload_without_image_host_fails_cleanly() {
    let (ctx, _db) = setup_context().await;
    assert!(!ctx.manage_breweries.uploads_enabled());

    let mut input = new_brewery("Sak Pub");
    input.logo = LogoSource::Upload(LogoUpload {
        file_name: "logo.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    });

    let err = ctx.manage_breweries.create(input).await.unwrap_err();
    assert!(matches!(err, AppError::UploadFailed(_)));
    assert!(ctx.manage_breweries.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn backfill_attaches_legacy_votes_by_name() {
    let (ctx, db) = setup_context().await;
    let (breweries, votes) = repositories(&db);
    let brewery = insert_brewery(&breweries, "Sak Pub").await;

    let legacy = |voter: &str, name: &str| Vote {
        id: Uuid::new_v4(),
        voter_identity: voter.to_string(),
        target_id: None,
        target_name: name.to_string(),
        rating: Rating::new(6).unwrap(),
        submitted_at: None,
    };
    votes.create(&legacy("alice", "Sak Pub")).await.unwrap();
    votes.create(&legacy("bob", "Closed Brewery")).await.unwrap();
    // carol already has an id-based vote, so her legacy one must stay unlinked
    vote(&ctx, "carol", brewery.id, 9).await.unwrap();
    votes.create(&legacy("carol", "Sak Pub")).await.unwrap();

    // name fallback already counts alice and carol's legacy votes
    let before = ctx.tally_votes.leaderboard().await.unwrap();
    assert_eq!(before.entries()[0].vote_count, 3);

    assert_eq!(ctx.tally_votes.backfill_legacy_targets().await.unwrap(), 1);
    assert_eq!(votes.find_without_target().await.unwrap().len(), 2);
    assert_eq!(ctx.tally_votes.backfill_legacy_targets().await.unwrap(), 0);

    let after = ctx.tally_votes.leaderboard().await.unwrap();
    assert_eq!(after.entries()[0].vote_count, 3);
}

#[tokio::test]
async fn csv_exports() {
    let (ctx, _db) = setup_context().await;
    let brewery = ctx.manage_breweries.create(new_brewery("Sak Pub")).await.unwrap();
    vote(&ctx, "alice", brewery.id, 9).await.unwrap();

    let board = ctx.tally_votes.export_leaderboard_csv().await.unwrap();
    assert_eq!(board, "rank,brewery,vote_count,average_rating\n1,Sak Pub,1,9.0\n");

    let votes = ctx.tally_votes.export_votes_csv().await.unwrap();
    let lines: Vec<_> = votes.lines().collect();
    assert_eq!(lines[0], "submitted_at,voter,brewery,rating");
    assert!(lines[1].ends_with(",alice,Sak Pub,9"));
}
