//! Shared setup for the store and service tests: an in-memory SQLite database
//! with the production schema applied.

#![allow(dead_code)]

use brewfest_app::config::AppConfig;
use brewfest_app::domain::{Brewery, MatchPolicy};
use brewfest_app::infrastructure::db::{self, BreweryRepository, VoteRepository};
use brewfest_app::AppContext;
use sea_orm::{Database, DatabaseConnection};
use std::time::Duration;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db::run_migrations(&db).await.unwrap();
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
        session_secret: None,
        cloudinary: None,
        match_policy: MatchPolicy::IdOrLegacyName,
        secure_cookies: false,
    }
}

pub async fn setup_context() -> (AppContext, DatabaseConnection) {
    let db = setup_db().await;
    (AppContext::new(db.clone(), test_config()), db)
}

pub fn repositories(db: &DatabaseConnection) -> (BreweryRepository, VoteRepository) {
    (
        BreweryRepository::new(db.clone()),
        VoteRepository::new(db.clone()),
    )
}

pub fn brewery(name: &str) -> Brewery {
    Brewery::new(
        name.to_string(),
        format!("{} pours a hoppy lineup", name),
        "https://maps.google.com/?q=brewery".to_string(),
        "https://res.cloudinary.com/demo/image/upload/beers/logo.png".to_string(),
    )
}

pub async fn insert_brewery(repo: &BreweryRepository, name: &str) -> Brewery {
    let created = repo.create(&brewery(name)).await.unwrap();
    // created_at ordering needs distinct timestamps
    tokio::time::sleep(Duration::from_millis(5)).await;
    created
}
