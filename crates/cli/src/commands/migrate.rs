//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! tk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` URL of the session database
//!   (falls back to `DATABASE_URL`, then `sqlite://thriftkids.db?mode=rwc`)
//!
//! The storefront keeps carts inside session records, so the only schema is
//! the session table owned by the session store.

use thiserror::Error;
use thriftkids_storefront::config::{ConfigError, StorefrontConfig};
use thriftkids_storefront::db;

/// Errors running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// reached or migrated.
pub async fn storefront() -> Result<(), MigrationError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running storefront migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
