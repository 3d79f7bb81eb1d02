//! Database operations for the storefront `SQLite` file.
//!
//! # Database: `thriftkids.db`
//!
//! Holds session records only. Each visitor's cart lives inside their
//! session record under the `thriftkids_cart` key; there are no cart tables.
//!
//! ## Tables
//!
//! - `tower_sessions` - Tower-sessions storage
//!
//! # Migrations
//!
//! The session table is created by:
//! ```bash
//! cargo run -p thriftkids-cli -- migrate
//! ```

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower_sessions_sqlx_store::SqliteStore;

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Session store backed by the pool.
#[must_use]
pub fn session_store(pool: &SqlitePool) -> SqliteStore {
    SqliteStore::new(pool.clone())
}

/// Create the session table if it does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the schema statements fail.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    session_store(pool).migrate().await
}
