use crate::domain::Rating;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voter_identity: String,
    pub target_id: Option<Uuid>,
    pub target_name: String,
    pub rating: i32,
    pub submitted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for crate::domain::Vote {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let rating = Rating::new(model.rating)
            .map_err(|_| DbErr::Type(format!("vote {} has rating {}", model.id, model.rating)))?;

        Ok(Self {
            id: model.id,
            voter_identity: model.voter_identity,
            target_id: model.target_id,
            target_name: model.target_name,
            rating,
            submitted_at: model.submitted_at,
        })
    }
}
