//! Product catalog loading.
//!
//! The catalog is read once at startup, either from the file named by
//! `STOREFRONT_CATALOG_PATH` or from the copy bundled into the binary. It is
//! read-only for the lifetime of the process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kidsplay_core::{Product, ProductId};
use thiserror::Error;

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../content/catalog.json");

/// Errors loading the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Load the catalog from `path`, or the bundled catalog when `None`.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, is not a JSON array of
/// products, or repeats a product id.
pub fn load(path: Option<&Path>) -> Result<Vec<Product>, CatalogError> {
    let Some(path) = path else {
        tracing::info!("Using bundled catalog");
        return parse(BUNDLED_CATALOG);
    };

    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let products = parse(&json)?;
    tracing::info!(path = %path.display(), count = products.len(), "Loaded catalog");
    Ok(products)
}

/// Parse a JSON catalog and check that ids are unique.
///
/// # Errors
///
/// Returns `CatalogError` on malformed JSON or a repeated id.
pub fn parse(json: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(products.len());
    if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
        return Err(CatalogError::DuplicateId(dup.id));
    }

    if products.is_empty() {
        tracing::warn!("Catalog is empty");
    }
    Ok(products)
}
