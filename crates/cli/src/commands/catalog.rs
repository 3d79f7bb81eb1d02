//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! tk-cli catalog check
//! tk-cli catalog check crates/storefront/content/catalog.json
//! ```
//!
//! The file is parsed the same way the storefront parses it at startup, so a
//! catalog that passes here will load there.

use std::path::PathBuf;

use thiserror::Error;
use thriftkids_core::Price;
use thriftkids_storefront::catalog::{CatalogLoadError, load_catalog};
use thriftkids_storefront::config::{ConfigError, StorefrontConfig};

/// Errors checking a catalog.
#[derive(Debug, Error)]
pub enum CatalogCheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] CatalogLoadError),
}

/// Parse and validate a catalog, logging each product.
///
/// Uses `path` if given, otherwise the configured catalog path.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the catalog does not load.
pub fn check(path: Option<PathBuf>) -> Result<(), CatalogCheckError> {
    let config = StorefrontConfig::from_env()?;
    let path = path.unwrap_or(config.catalog_path);

    let catalog = load_catalog(&path, config.currency)?;

    for (id, entry) in catalog.iter() {
        let price = Price::new(entry.price, catalog.currency_code());
        tracing::info!(%id, name = %entry.name, price = %price.display(), "Product");
    }
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "Catalog is valid but has no products");
    } else {
        tracing::info!(products = catalog.len(), path = %path.display(), "Catalog is valid");
    }
    Ok(())
}
