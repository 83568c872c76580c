//! Catalog inspection commands.

use std::path::{Path, PathBuf};

use thiserror::Error;
use ttp_core::{Catalog, CatalogError, Product};

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not a JSON array of products.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// File parsed but failed validation.
    #[error("{count} validation errors found in {path}")]
    Invalid { path: PathBuf, count: usize },
}

/// Read and validate a catalog, logging every validation error.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// contains invalid products.
pub async fn load(path: &Path) -> Result<Catalog, CatalogCommandError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogCommandError::Io {
                path: path.to_path_buf(),
                source,
            })?;

    let products: Vec<Product> =
        serde_json::from_str(&content).map_err(|source| CatalogCommandError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let errors = Catalog::validate(&products);
    if !errors.is_empty() {
        report(&errors);
        return Err(CatalogCommandError::Invalid {
            path: path.to_path_buf(),
            count: errors.len(),
        });
    }

    Catalog::new(products).map_err(|e| {
        report(std::slice::from_ref(&e));
        CatalogCommandError::Invalid {
            path: path.to_path_buf(),
            count: 1,
        }
    })
}

fn report(errors: &[CatalogError]) {
    tracing::error!("Catalog validation failed:");
    for err in errors {
        tracing::error!("  - {err}");
    }
}

/// Check a catalog file and report its products.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or is invalid.
pub async fn check(path: &Path) -> Result<usize, CatalogCommandError> {
    tracing::info!(path = %path.display(), "Checking catalog");

    let catalog = load(path).await?;

    for product in catalog.iter() {
        tracing::info!(id = %product.id, price = %product.price, "{}", product.name);
    }
    tracing::info!(products = catalog.len(), "Catalog is valid");

    Ok(catalog.len())
}
