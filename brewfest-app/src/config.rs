use crate::domain::MatchPolicy;
use brewfest_errors::AppError;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";
const DEFAULT_UPLOAD_FOLDER: &str = "beers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub folder: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Secret the session cookie is signed with. `None` means a per-process key.
    pub session_secret: Option<String>,
    pub cloudinary: Option<CloudinaryConfig>,
    pub match_policy: MatchPolicy,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let release_build = !cfg!(debug_assertions);

        let database_url =
            get("DATABASE_URL").ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let session_secret = get("SESSION_SECRET");
        if release_build && session_secret.is_none() {
            return Err(AppError::Config(
                "SESSION_SECRET must be set in release builds".to_string(),
            ));
        }

        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
                base_url: get("CLOUDINARY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_CLOUDINARY_BASE_URL.to_string()),
                folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            }),
            (None, None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together"
                        .to_string(),
                ))
            }
        };

        let match_policy = match get("VOTE_MATCH_POLICY") {
            Some(raw) => raw.parse().map_err(AppError::Config)?,
            None => MatchPolicy::default(),
        };

        Ok(Self {
            database_url,
            admin_username: get("ADMIN_USERNAME").unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: get("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            session_secret,
            cloudinary,
            match_policy,
            secure_cookies: release_build,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();

        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "admin123");
        assert!(config.cloudinary.is_none());
        assert_eq!(config.match_policy, MatchPolicy::IdOrLegacyName);
    }

    #[test]
    fn test_database_url_required() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_partial_cloudinary_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("CLOUDINARY_CLOUD_NAME", "festival"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_full_cloudinary_and_policy() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("CLOUDINARY_CLOUD_NAME", "festival"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
            ("VOTE_MATCH_POLICY", "id-only"),
        ]))
        .unwrap();

        let cloudinary = config.cloudinary.unwrap();
        assert_eq!(cloudinary.base_url, "https://api.cloudinary.com");
        assert_eq!(cloudinary.folder, "beers");
        assert_eq!(config.match_policy, MatchPolicy::IdOnly);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("VOTE_MATCH_POLICY", "loudest"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
