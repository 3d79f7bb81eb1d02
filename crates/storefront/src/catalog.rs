//! Product catalog loading.
//!
//! The catalog is read from a JSON file once at startup and held in memory
//! for the life of the process. A missing or broken file does not stop the
//! server: pages that need the catalog log a diagnostic and degrade instead.

use std::path::Path;

use thriftkids_core::{Catalog, CatalogError, CurrencyCode};

/// Errors loading the catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: CatalogError,
    },
}

/// Read and validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub fn load_catalog(path: &Path, currency: CurrencyCode) -> Result<Catalog, CatalogLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Catalog::from_json_str(&text, currency).map_err(|source| CatalogLoadError::Invalid {
        path: path.display().to_string(),
        source,
    })
}

/// Load the catalog, logging instead of failing.
///
/// Returns `None` when the catalog is unavailable.
#[must_use]
pub fn load_catalog_or_log(path: &Path, currency: CurrencyCode) -> Option<Catalog> {
    match load_catalog(path, currency) {
        Ok(catalog) => {
            tracing::info!(products = catalog.len(), path = %path.display(), "Loaded catalog");
            Some(catalog)
        }
        Err(e) => {
            tracing::error!("Catalog unavailable, cart pages will not render: {e}");
            None
        }
    }
}
