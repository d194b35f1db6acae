//! Catalog providers.
//!
//! The engine consumes a catalog exactly once, at construction. A provider
//! either hands over an in-memory list or reads a JSON array from disk.
//! Entries that fail to deserialize, or repeat an earlier identifier, are
//! skipped with a warning rather than failing the whole load.

use crate::product::ProductRecord;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog root must be a JSON array of products")]
    NotAnArray,

    #[error("entry {index} is not a valid product: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("entry {index} repeats product id {id:?}")]
    DuplicateId { index: usize, id: String },
}

/// Source of the product catalog.
pub trait CatalogProvider: Send + Sync {
    fn load_catalog(&self) -> Result<Vec<ProductRecord>>;
}

/// A catalog already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductRecord>,
}

impl StaticCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }
}

impl CatalogProvider for StaticCatalog {
    fn load_catalog(&self) -> Result<Vec<ProductRecord>> {
        let (products, skipped) = dedup_records(self.products.clone());
        if skipped > 0 {
            warn!(skipped, "Static catalog contained duplicate product ids");
        }
        Ok(products)
    }
}

/// A catalog stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for JsonCatalog {
    fn load_catalog(&self) -> Result<Vec<ProductRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read catalog at {:?}", self.path))?;

        let products = parse_catalog(&raw)
            .with_context(|| format!("Failed to parse catalog at {:?}", self.path))?;

        info!(
            path = ?self.path,
            products = products.len(),
            "Catalog loaded"
        );
        Ok(products)
    }
}

/// Parses a JSON array of products, skipping malformed and duplicate entries.
pub fn parse_catalog(raw: &str) -> Result<Vec<ProductRecord>> {
    let root: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = root else {
        return Err(CatalogError::NotAnArray.into());
    };

    let mut products = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match parse_entry(index, entry) {
            Ok(product) => {
                if seen.insert(product.id.clone()) {
                    products.push(product);
                } else {
                    let err = CatalogError::DuplicateId {
                        index,
                        id: product.id,
                    };
                    warn!("Skipping catalog entry: {}", err);
                }
            }
            Err(err) => warn!("Skipping catalog entry: {}", err),
        }
    }

    debug!("Parsed {} catalog entries", products.len());
    Ok(products)
}

fn parse_entry(index: usize, entry: Value) -> std::result::Result<ProductRecord, CatalogError> {
    let product: ProductRecord =
        serde_json::from_value(entry).map_err(|e| CatalogError::InvalidEntry {
            index,
            reason: e.to_string(),
        })?;

    if product.id.trim().is_empty() {
        return Err(CatalogError::InvalidEntry {
            index,
            reason: "empty id".to_string(),
        });
    }

    Ok(product)
}

fn dedup_records(products: Vec<ProductRecord>) -> (Vec<ProductRecord>, usize) {
    let before = products.len();
    let mut seen = HashSet::new();
    let kept: Vec<ProductRecord> = products
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();
    let skipped = before - kept.len();
    (kept, skipped)
}
