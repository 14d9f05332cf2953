use super::session_error;
use crate::domain::anonymous_voter_token;
use brewfest_errors::AppError;
use tower_sessions::Session;

pub const SESSION_VOTER_KEY: &str = "brewfest:voter";

pub struct VoterSession;

impl VoterSession {
    /// Returns the visitor's anonymous voter token, issuing one on first use.
    pub async fn identity(session: &Session) -> Result<String, AppError> {
        if let Some(token) = session
            .get::<String>(SESSION_VOTER_KEY)
            .await
            .map_err(session_error)?
        {
            return Ok(token);
        }

        let token = anonymous_voter_token();
        session
            .insert(SESSION_VOTER_KEY, token.clone())
            .await
            .map_err(session_error)?;
        Ok(token)
    }
}
