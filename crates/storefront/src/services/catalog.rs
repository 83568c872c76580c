//! Catalog loading.
//!
//! The catalog is a JSON array of products read once at startup. A catalog
//! that fails validation stops the server rather than serving a partial menu.

use std::path::{Path, PathBuf};

use thiserror::Error;
use ttp_core::{Catalog, CatalogError};

/// Errors loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: CatalogError,
    },
}

/// Read and validate the catalog at `path`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or fails validation.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = Catalog::from_json_str(&json).map_err(|source| CatalogLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "Catalog has no products");
    }

    Ok(catalog)
}
