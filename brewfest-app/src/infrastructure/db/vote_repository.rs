use super::entities::{vote, Vote};
use crate::domain;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, voter_identity: &str, target_id: Uuid) -> Result<bool, DbErr> {
        let vote = Vote::find()
            .filter(vote::Column::VoterIdentity.eq(voter_identity))
            .filter(vote::Column::TargetId.eq(target_id))
            .one(&self.db)
            .await?;
        Ok(vote.is_some())
    }

    /// Inserts a vote. A second vote for the same voter and brewery fails with a
    /// unique constraint violation from the store.
    pub async fn create(&self, vote_data: &domain::Vote) -> Result<domain::Vote, DbErr> {
        let active = vote::ActiveModel {
            id: Set(vote_data.id),
            voter_identity: Set(vote_data.voter_identity.clone()),
            target_id: Set(vote_data.target_id),
            target_name: Set(vote_data.target_name.clone()),
            rating: Set(vote_data.rating.into()),
            submitted_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await?.try_into()
    }

    /// All votes, newest first.
    pub async fn find_all(&self) -> Result<Vec<domain::Vote>, DbErr> {
        Vote::find()
            .order_by_desc(vote::Column::SubmittedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(domain::Vote::try_from)
            .collect()
    }

    /// Legacy votes stored before the brewery id was recorded.
    pub async fn find_without_target(&self) -> Result<Vec<domain::Vote>, DbErr> {
        Vote::find()
            .filter(vote::Column::TargetId.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(domain::Vote::try_from)
            .collect()
    }

    pub async fn set_target(&self, vote_id: Uuid, target_id: Uuid) -> Result<(), DbErr> {
        Vote::update_many()
            .col_expr(vote::Column::TargetId, Expr::value(target_id))
            .filter(vote::Column::Id.eq(vote_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Vote::find().count(&self.db).await
    }

    /// Bulk reset. Returns the number of votes removed.
    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = Vote::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
