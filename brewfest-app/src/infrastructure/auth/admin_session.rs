use super::session_error;
use crate::infrastructure::security::AdminCredentials;
use brewfest_errors::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const SESSION_ADMIN_KEY: &str = "brewfest:admin";
pub const ADMIN_SESSION_HOURS: i64 = 8;

/// Stored in the session once the admin has logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMarker {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl AdminMarker {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.logged_in_at) < Duration::hours(ADMIN_SESSION_HOURS)
    }
}

pub struct AdminSession;

impl AdminSession {
    pub async fn login(
        session: &Session,
        credentials: &AdminCredentials,
        username: &str,
        password: &str,
    ) -> Result<(), AppError> {
        if !credentials.verify(username, password) {
            tracing::warn!("Rejected admin login for {:?}", username);
            return Err(AppError::InvalidCredentials);
        }

        session.cycle_id().await.map_err(session_error)?;
        session
            .insert(
                SESSION_ADMIN_KEY,
                AdminMarker {
                    username: username.to_string(),
                    logged_in_at: Utc::now(),
                },
            )
            .await
            .map_err(session_error)?;

        tracing::info!("Admin {} logged in", username);
        Ok(())
    }

    /// The logged-in admin, if the session carries a marker that has not expired.
    pub async fn current(session: &Session) -> Result<Option<AdminMarker>, AppError> {
        let marker: Option<AdminMarker> =
            session.get(SESSION_ADMIN_KEY).await.map_err(session_error)?;

        Ok(marker.filter(|m| m.is_fresh(Utc::now())))
    }

    pub async fn is_admin(session: &Session) -> Result<bool, AppError> {
        Ok(Self::current(session).await?.is_some())
    }

    pub async fn require(session: &Session) -> Result<(), AppError> {
        if Self::is_admin(session).await? {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    pub async fn logout(session: &Session) -> Result<(), AppError> {
        session
            .remove::<AdminMarker>(SESSION_ADMIN_KEY)
            .await
            .map_err(session_error)?;
        Ok(())
    }
}
