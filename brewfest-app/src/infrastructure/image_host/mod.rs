mod cloudinary;
mod types;

pub use cloudinary::{upload_signature, CloudinaryClient};
pub use types::LogoUpload;

use crate::config::CloudinaryConfig;
use brewfest_errors::AppError;

pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

pub enum ImageHost {
    Cloudinary(CloudinaryClient),
    Disabled,
}

impl ImageHost {
    pub fn from_config(config: Option<&CloudinaryConfig>) -> Self {
        match config {
            Some(config) => Self::Cloudinary(CloudinaryClient::new(config.clone())),
            None => {
                tracing::warn!("Cloudinary is not configured, logo uploads are disabled");
                Self::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Cloudinary(_))
    }

    /// Pushes the logo to the host and returns its public URL.
    pub async fn upload(&self, logo: LogoUpload) -> Result<String, AppError> {
        validate_logo(&logo)?;

        match self {
            Self::Cloudinary(client) => client.upload(logo).await,
            Self::Disabled => Err(AppError::UploadFailed(
                "image hosting is not configured".to_string(),
            )),
        }
    }
}

pub fn validate_logo(logo: &LogoUpload) -> Result<(), AppError> {
    if logo.bytes.is_empty() {
        return Err(AppError::Validation("Please select a logo".to_string()));
    }

    if logo.bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::Validation(format!(
            "Logo must be smaller than {} MB",
            MAX_LOGO_BYTES / (1024 * 1024)
        )));
    }

    if !logo.content_type.starts_with("image/") {
        return Err(AppError::Validation("Logo must be an image".to_string()));
    }

    Ok(())
}
