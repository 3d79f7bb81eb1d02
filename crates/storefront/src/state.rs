//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;
use thriftkids_core::Catalog;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the session database and the product catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: SqlitePool,
    catalog: Option<Catalog>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `SQLite` connection pool backing the session store
    /// * `catalog` - Product catalog, or `None` if it could not be loaded
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: SqlitePool, catalog: Option<Catalog>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// The product catalog, if one was loaded.
    #[must_use]
    pub fn catalog(&self) -> Option<&Catalog> {
        self.inner.catalog.as_ref()
    }
}
