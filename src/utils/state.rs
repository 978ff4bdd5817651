use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    database::{queries::SeaOrmStore, Migrator},
    models::{course_creators, users},
};

#[derive(Clone)]
pub struct AppState {
    pub account_repo: Arc<SeaOrmStore<users::Entity>>,
    pub course_creator_repo: Arc<SeaOrmStore<course_creators::Entity>>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            account_repo: Arc::new(SeaOrmStore::new(Arc::clone(&db))),
            course_creator_repo: Arc::new(SeaOrmStore::new(db)),
        }
    }
}

/// Connects to the configured database and brings the schema up to date.
pub async fn setup(config: &Config) -> Result<AppState> {
    let db: DatabaseConnection = Database::connect(config.database.url.expose_secret())
        .await
        .wrap_err("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .wrap_err("Failed to apply migrations")?;
    tracing::info!("Database migrations applied");

    Ok(AppState::new(Arc::new(db)))
}
