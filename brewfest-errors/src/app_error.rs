use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("You have already voted for this brewery")]
    AlreadyVoted,

    #[error("Resource not found")]
    NotFound,

    #[error("Admin session required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many requests: {0}")]
    RateLimited(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("Invalid input: ") {
            Ok(AppError::Validation(rest.to_string()))
        } else if s.starts_with("You have already voted") {
            Ok(AppError::AlreadyVoted)
        } else if s == "Resource not found" {
            Ok(AppError::NotFound)
        } else if s == "Admin session required" {
            Ok(AppError::Unauthorized)
        } else if s == "Invalid credentials" {
            Ok(AppError::InvalidCredentials)
        } else if let Some(rest) = s.strip_prefix("Too many requests: ") {
            Ok(AppError::RateLimited(rest.to_string()))
        } else if let Some(rest) = s.strip_prefix("Image upload failed: ") {
            Ok(AppError::UploadFailed(rest.to_string()))
        } else if let Some(rest) = s.strip_prefix("Database error: ") {
            Ok(AppError::Database(rest.to_string()))
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    /// Copy shown to visitors. Store and upstream details never leak here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::AlreadyVoted => {
                "You have already voted for this brewery! You can still vote for others.".to_string()
            }
            Self::NotFound => "That brewery could not be found.".to_string(),
            Self::Unauthorized => "Please log in to the admin dashboard.".to_string(),
            Self::InvalidCredentials => "Invalid username or password.".to_string(),
            Self::RateLimited(msg) => msg.clone(),
            Self::UploadFailed(_) => "The logo could not be uploaded. Please try again.".to_string(),
            Self::Database(_) => "An error occurred while saving. Please try again.".to_string(),
            Self::Config(_) | Self::Internal(_) => {
                "Something went wrong on our side. Please try again later.".to_string()
            }
        }
    }

    /// Whether the failure is an expected outcome of user input rather than a fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::AlreadyVoted
                | Self::NotFound
                | Self::Unauthorized
                | Self::InvalidCredentials
                | Self::RateLimited(_)
        )
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::AlreadyVoted => StatusCode::CONFLICT,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::UploadFailed(_) => StatusCode::BAD_GATEWAY,
                AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if !self.is_expected() {
                tracing::error!("{}", self);
            }
            let message = self.user_message();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_display() {
        let errors = [
            AppError::Validation("Rating must be between 1 and 10".to_string()),
            AppError::AlreadyVoted,
            AppError::NotFound,
            AppError::Unauthorized,
            AppError::InvalidCredentials,
            AppError::RateLimited("wait 30 seconds".to_string()),
            AppError::UploadFailed("502".to_string()),
            AppError::Database("connection reset".to_string()),
        ];
        for err in errors {
            let parsed: AppError = err.to_string().parse().unwrap();
            assert_eq!(parsed, err);
        }
    }

    #[test]
    fn test_unknown_string_is_internal() {
        let parsed: AppError = "boom".parse().unwrap();
        assert_eq!(parsed, AppError::Internal("boom".to_string()));
    }

    #[test]
    fn test_user_message_hides_store_details() {
        let msg = AppError::Database("relation votes does not exist".to_string()).user_message();
        assert!(!msg.contains("relation"));
        assert!(AppError::AlreadyVoted.user_message().contains("already voted"));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_status_mapping() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        assert_eq!(AppError::AlreadyVoted.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RateLimited("x".to_string()).into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
