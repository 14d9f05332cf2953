pub mod entities;
mod brewery_repository;
mod vote_repository;

pub use brewery_repository::BreweryRepository;
pub use vote_repository::VoteRepository;

use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, SqlErr,
};
use std::time::Duration;

pub const VOTE_UNIQUE_INDEX: &str = "idx_votes_voter_target";

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates both tables and the one-vote-per-voter-per-brewery index if missing.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let breweries = schema
        .create_table_from_entity(entities::Brewery)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&breweries)).await?;

    let votes = schema
        .create_table_from_entity(entities::Vote)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&votes)).await?;

    let unique_vote = Index::create()
        .name(VOTE_UNIQUE_INDEX)
        .table(entities::Vote)
        .col(entities::vote::Column::VoterIdentity)
        .col(entities::vote::Column::TargetId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&unique_vote)).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
