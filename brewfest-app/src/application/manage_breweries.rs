use super::store_error;
use crate::domain::{Brewery, BreweryPatch};
use crate::infrastructure::db::BreweryRepository;
use crate::infrastructure::image_host::{ImageHost, LogoUpload};
use crate::infrastructure::security::InputSanitizer;
use brewfest_errors::AppError;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum LogoSource {
    Url(String),
    Upload(LogoUpload),
}

#[derive(Debug, Clone)]
pub struct NewBreweryInput {
    pub name: String,
    pub description: String,
    pub location_url: String,
    pub logo: LogoSource,
}

pub struct ManageBreweries {
    repo: BreweryRepository,
    image_host: ImageHost,
}

impl ManageBreweries {
    pub fn new(repo: BreweryRepository, image_host: ImageHost) -> Self {
        Self { repo, image_host }
    }

    pub fn uploads_enabled(&self) -> bool {
        self.image_host.is_enabled()
    }

    pub async fn list(&self) -> Result<Vec<Brewery>, AppError> {
        self.repo.find_all().await.map_err(store_error)
    }

    pub async fn get(&self, id: Uuid) -> Result<Brewery, AppError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, input: NewBreweryInput) -> Result<Brewery, AppError> {
        let name = InputSanitizer::validate_name(&input.name)?;
        let description = InputSanitizer::validate_description(&input.description)?;
        let location_url = InputSanitizer::validate_url("Location link", &input.location_url)?;

        // Text is validated first so a bad form never costs an upload.
        let logo_url = match input.logo {
            LogoSource::Url(url) => InputSanitizer::validate_url("Logo URL", &url)?,
            LogoSource::Upload(upload) => self.image_host.upload(upload).await?,
        };

        let brewery = Brewery::new(name, description, location_url, logo_url);
        let created = self.repo.create(&brewery).await.map_err(store_error)?;

        tracing::info!("Brewery {} created ({})", created.name, created.id);
        Ok(created)
    }

    /// Partial update. A new logo upload replaces any `logo_url` in the patch.
    pub async fn update(
        &self,
        id: Uuid,
        patch: BreweryPatch,
        logo: Option<LogoUpload>,
    ) -> Result<Brewery, AppError> {
        let mut patch = InputSanitizer::clean_patch(patch)?;

        if self.repo.find_by_id(id).await.map_err(store_error)?.is_none() {
            return Err(AppError::NotFound);
        }

        if let Some(upload) = logo {
            patch.logo_url = Some(self.image_host.upload(upload).await?);
        }

        let updated = self
            .repo
            .update(id, &patch)
            .await
            .map_err(store_error)?
            .ok_or(AppError::NotFound)?;

        tracing::info!("Brewery {} updated", updated.id);
        Ok(updated)
    }

    /// Hard delete. Existing votes for the brewery stay in the store, unattributed.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await.map_err(store_error)? {
            return Err(AppError::NotFound);
        }

        tracing::info!("Brewery {} deleted", id);
        Ok(())
    }
}
