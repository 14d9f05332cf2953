use serde::Deserialize;

/// An image received from an admin form, not yet hosted anywhere.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadErrorResponse {
    pub error: UploadErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct UploadErrorDetail {
    pub message: String,
}
