use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::{database::Migrator, models::Account, utils::state::AppState};

/// Fresh in-memory SQLite database with the real schema applied.
pub async fn test_db() -> Arc<DatabaseConnection> {
    // A single connection, otherwise every pooled connection sees its own empty database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");
    Arc::new(db)
}

pub fn test_app_state(db: Arc<DatabaseConnection>) -> AppState {
    AppState::new(db)
}

/// Stores a regular account and hands it back.
pub async fn create_user(state: &AppState, username: &str, email: &str) -> Account {
    let account = Account::new(username, email);
    state
        .account_repo
        .insert_one(account.clone())
        .await
        .expect("Failed to create user");
    account
}
