use super::types::{LogoUpload, UploadErrorResponse, UploadResponse};
use crate::config::CloudinaryConfig;
use brewfest_errors::AppError;
use reqwest::multipart::{Form, Part};
use sha2::{Digest, Sha256};

pub struct CloudinaryClient {
    http_client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    pub async fn upload(&self, logo: LogoUpload) -> Result<String, AppError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = upload_signature(&self.config.folder, timestamp, &self.config.api_secret);

        let file = Part::bytes(logo.bytes)
            .file_name(logo.file_name)
            .mime_str(&logo.content_type)
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.config.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .http_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<UploadErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Cloudinary error: {} - {}", status, detail);
            return Err(AppError::UploadFailed(format!("API error: {}", status)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        tracing::info!("Uploaded logo to {}", uploaded.secure_url);
        Ok(uploaded.secure_url)
    }
}

/// Signature over the sorted upload parameters followed by the API secret.
pub fn upload_signature(folder: &str, timestamp: i64, api_secret: &str) -> String {
    let payload = format!("folder={}&timestamp={}{}", folder, timestamp, api_secret);
    format!("{:x}", Sha256::digest(payload.as_bytes()))
}
