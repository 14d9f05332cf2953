use crate::application::{ManageBreweries, SubmitVote, TallyVotes};
use crate::config::AppConfig;
use crate::infrastructure::db::{self, BreweryRepository, VoteRepository};
use crate::infrastructure::image_host::ImageHost;
use crate::infrastructure::security::{AdminCredentials, RateLimit, RateLimiter};
use brewfest_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub submit_vote: Arc<SubmitVote>,
    pub manage_breweries: Arc<ManageBreweries>,
    pub tally_votes: Arc<TallyVotes>,
    pub admin_credentials: Arc<AdminCredentials>,
    pub vote_limiter: RateLimiter,
    pub login_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let breweries = BreweryRepository::new(db.clone());
        let votes = VoteRepository::new(db);
        let image_host = ImageHost::from_config(config.cloudinary.as_ref());

        if image_host.is_enabled() {
            tracing::info!("Logo uploads go to Cloudinary");
        }

        Self {
            submit_vote: Arc::new(SubmitVote::new(breweries.clone(), votes.clone())),
            manage_breweries: Arc::new(ManageBreweries::new(breweries.clone(), image_host)),
            tally_votes: Arc::new(TallyVotes::new(breweries, votes, config.match_policy)),
            admin_credentials: Arc::new(AdminCredentials::new(
                &config.admin_username,
                &config.admin_password,
            )),
            vote_limiter: RateLimiter::new(RateLimit::VOTES),
            login_limiter: RateLimiter::new(RateLimit::LOGINS),
            config: Arc::new(config),
        }
    }

    /// Connects to the configured database and makes sure the schema exists.
    pub async fn connect(config: AppConfig) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Database(format!("connect failed: {}", e)))?;
        db::run_migrations(&db)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {}", e)))?;

        tracing::info!("Connected to database");
        Ok(Self::new(db, config))
    }
}
