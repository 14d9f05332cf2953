use axum::extract::Multipart;
use brewfest_app::application::{LogoSource, NewBreweryInput};
use brewfest_app::domain::BreweryPatch;
use brewfest_app::infrastructure::image_host::LogoUpload;
use brewfest_errors::AppError;
use serde::Deserialize;

/// Brewery fields as sent by the admin forms (multipart) or the JSON API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BreweryForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_url: Option<String>,
    pub logo_url: Option<String>,
    #[serde(skip)]
    pub logo: Option<LogoUpload>,
}

impl BreweryForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "logo" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(bad_multipart)?;
                    // Browsers send an empty part when no file was picked.
                    if !bytes.is_empty() {
                        form.logo = Some(LogoUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                "name" | "description" | "location_url" | "logo_url" => {
                    let value = field.text().await.map_err(bad_multipart)?;
                    let slot = match name.as_str() {
                        "name" => &mut form.name,
                        "description" => &mut form.description,
                        "location_url" => &mut form.location_url,
                        _ => &mut form.logo_url,
                    };
                    *slot = Some(value);
                }
                other => tracing::debug!("Ignoring form field {}", other),
            }
        }

        Ok(form)
    }

    /// Input for a new brewery. An uploaded file wins over a logo URL.
    pub fn into_new(self) -> Result<NewBreweryInput, AppError> {
        let logo = match (self.logo, non_blank(self.logo_url)) {
            (Some(upload), _) => LogoSource::Upload(upload),
            (None, Some(url)) => LogoSource::Url(url),
            (None, None) => {
                return Err(AppError::Validation(
                    "Please provide a logo URL or upload a logo".to_string(),
                ))
            }
        };

        Ok(NewBreweryInput {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location_url: self.location_url.unwrap_or_default(),
            logo,
        })
    }

    /// Partial update. Blank fields leave the stored value alone.
    pub fn into_patch(self) -> (BreweryPatch, Option<LogoUpload>) {
        let patch = BreweryPatch {
            name: non_blank(self.name),
            description: non_blank(self.description),
            location_url: non_blank(self.location_url),
            logo_url: non_blank(self.logo_url),
        };
        (patch, self.logo)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Could not read the form: {}", err.body_text()))
}
