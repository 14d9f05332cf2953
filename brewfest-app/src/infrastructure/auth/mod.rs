mod admin_session;
mod voter_session;

pub use admin_session::{AdminMarker, AdminSession, ADMIN_SESSION_HOURS, SESSION_ADMIN_KEY};
pub use voter_session::{VoterSession, SESSION_VOTER_KEY};

use brewfest_errors::AppError;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

/// Derives the 64-byte cookie signing key from a secret of any length.
pub fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Key for deployments without `SESSION_SECRET`. Sessions do not survive a restart.
pub fn ephemeral_session_key() -> Key {
    let secret = format!("{}{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4());
    session_key(&secret)
}

pub(crate) fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store: {}", err))
}
