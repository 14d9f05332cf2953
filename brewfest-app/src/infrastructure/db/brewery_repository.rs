use super::entities::{brewery, Brewery};
use crate::domain::{self, BreweryPatch};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct BreweryRepository {
    db: DatabaseConnection,
}

impl BreweryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, brewery_data: &domain::Brewery) -> Result<domain::Brewery, DbErr> {
        let active = brewery::ActiveModel {
            id: Set(brewery_data.id),
            name: Set(brewery_data.name.clone()),
            description: Set(brewery_data.description.clone()),
            location_url: Set(brewery_data.location_url.clone()),
            logo_url: Set(brewery_data.logo_url.clone()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        Ok(active.insert(&self.db).await?.into())
    }

    /// All breweries, newest first.
    pub async fn find_all(&self) -> Result<Vec<domain::Brewery>, DbErr> {
        let models = Brewery::find()
            .order_by_desc(brewery::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<domain::Brewery>, DbErr> {
        Ok(Brewery::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    /// Applies the provided fields only. `Ok(None)` when the brewery does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &BreweryPatch,
    ) -> Result<Option<domain::Brewery>, DbErr> {
        let Some(existing) = Brewery::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(existing.into()));
        }

        let mut active: brewery::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(location_url) = &patch.location_url {
            active.location_url = Set(location_url.clone());
        }
        if let Some(logo_url) = &patch.logo_url {
            active.logo_url = Set(logo_url.clone());
        }

        Ok(Some(active.update(&self.db).await?.into()))
    }

    /// Hard delete. Votes pointing at the brewery are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = Brewery::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Brewery::find().count(&self.db).await
    }
}
